/// Ads API routes
use crate::{
    error::{Result, ServerError},
    hub::HubEvent,
    middleware::AuthenticatedUser,
    state::AppState,
};
use adboard_core::{Ad, AdId, CreateAd, UpdateAd};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

/// Metadata part of the multipart upload
#[derive(Debug, Deserialize)]
struct AdMetadata {
    title: String,
    kind: String,
    duration_seconds: i64,
}

/// GET /api/ads - list the caller's ads
pub async fn list_ads(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<Ad>>> {
    let ads = adboard_storage::ads::get_by_owner(app_state.db.pool(), auth.user_id()).await?;
    Ok(Json(ads))
}

/// GET /api/ads/:id
pub async fn get_ad(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Ad>> {
    let ad_id = AdId::new(id);
    let ad = adboard_storage::ads::get(app_state.db.pool(), &ad_id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Ad not found: {}", ad_id)))?;
    Ok(Json(ad))
}

/// POST /api/ads
/// Multipart upload: a `metadata` JSON part (title/kind/duration_seconds)
/// and an optional `file` part with the ad media.
pub async fn create_ad(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    headers: axum::http::HeaderMap,
    body: axum::body::Bytes,
) -> Result<(StatusCode, Json<Ad>)> {
    let content_type = headers
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ServerError::BadRequest("Missing Content-Type".to_string()))?;

    if !content_type.starts_with("multipart/form-data") {
        return Err(ServerError::BadRequest(
            "Expected multipart/form-data".to_string(),
        ));
    }

    let boundary = content_type
        .split("boundary=")
        .nth(1)
        .ok_or_else(|| ServerError::BadRequest("Missing boundary".to_string()))?;

    // Convert Bytes to a stream for multer
    let stream = futures_util::stream::once(async move { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut metadata_json: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Failed to parse multipart: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                file_name = Some(field.file_name().unwrap_or("upload").to_string());
                file_data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| {
                            ServerError::BadRequest(format!("Failed to read file: {}", e))
                        })?
                        .to_vec(),
                );
            }
            "metadata" => {
                metadata_json = Some(field.text().await.map_err(|e| {
                    ServerError::BadRequest(format!("Failed to read metadata: {}", e))
                })?);
            }
            _ => {}
        }
    }

    let metadata_json =
        metadata_json.ok_or_else(|| ServerError::BadRequest("Missing metadata".to_string()))?;
    let metadata: AdMetadata = serde_json::from_str(&metadata_json)
        .map_err(|e| ServerError::BadRequest(format!("Invalid metadata: {}", e)))?;

    if metadata.duration_seconds <= 0 {
        return Err(ServerError::BadRequest(
            "Duration must be positive".to_string(),
        ));
    }

    // Store the media file first so a failed write never leaves a record
    // pointing at nothing
    let media_ref = match (file_name, file_data) {
        (Some(name), Some(data)) => Some(app_state.media_storage.store(&name, &data).await?),
        _ => None,
    };

    let ad = adboard_storage::ads::create(
        app_state.db.pool(),
        CreateAd {
            title: metadata.title,
            kind: metadata.kind,
            duration_seconds: metadata.duration_seconds,
            media_ref,
            owner: auth.user_id().clone(),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(ad)))
}

/// PATCH /api/ads/:id
/// Owner-only partial update. Every display currently linking the ad is
/// notified so its players refresh.
pub async fn update_ad(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(update): Json<UpdateAd>,
) -> Result<Json<Ad>> {
    let ad_id = AdId::new(id);
    let ad =
        adboard_storage::ads::update(app_state.db.pool(), &ad_id, auth.user_id(), update).await?;

    let linking =
        adboard_storage::playlist::displays_linking(app_state.db.pool(), &ad_id).await?;

    let hub = app_state.hub.clone();
    let event_ad_id = ad.id.clone();
    tokio::spawn(async move {
        for display_id in linking {
            hub.publish(
                display_id,
                HubEvent::AdUpdated {
                    display_id,
                    ad_id: event_ad_id.clone(),
                },
            )
            .await;
        }
    });

    Ok(Json(ad))
}

/// DELETE /api/ads/:id
/// Owner-only. Playlist rows referencing the ad are left in place and
/// pruned when the playlist is next read.
pub async fn delete_ad(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<serde_json::Value>> {
    let ad_id = AdId::new(id);
    let ad = adboard_storage::ads::delete(app_state.db.pool(), &ad_id, auth.user_id()).await?;

    if let Some(media_ref) = ad.media_ref {
        app_state.media_storage.delete(&media_ref).await;
    }

    Ok(Json(serde_json::json!({ "success": true })))
}
