/// Playlist API routes - linking ads to displays, ordering, overrides
use crate::{
    api::displays::owned_display,
    error::Result,
    hub::{HubEvent, NotificationHub},
    middleware::AuthenticatedUser,
    state::AppState,
};
use adboard_core::{Ad, AdId, AdOverride, DisplayId, OverridePatch};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub order: Vec<AdId>,
}

fn publish_display_updated(hub: Arc<NotificationHub>, display_id: DisplayId) {
    tokio::spawn(async move {
        hub.publish(display_id, HubEvent::DisplayUpdated { display_id })
            .await;
    });
}

/// GET /api/displays/:id/ads
/// The materialized playlist: linked ads in playlist order, dangling links
/// skipped, per-display overrides applied.
pub async fn list_linked_ads(
    Path(id): Path<i64>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<Ad>>> {
    let display_id = DisplayId::new(id);
    let ads = adboard_storage::playlist::linked_ads(app_state.db.pool(), display_id).await?;
    Ok(Json(ads))
}

/// POST /api/displays/:id/ads/:ad_id
/// Append the ad to the display's playlist. Linking an already-linked ad
/// is a no-op and publishes nothing.
pub async fn link_ad(
    Path((id, ad_id)): Path<(i64, String)>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<Ad>>> {
    let display_id = DisplayId::new(id);
    let ad_id = AdId::new(ad_id);
    owned_display(&app_state, display_id, auth.user_id()).await?;

    let changed = adboard_storage::playlist::link(app_state.db.pool(), display_id, &ad_id).await?;

    if changed {
        publish_display_updated(app_state.hub.clone(), display_id);
    }

    let ads = adboard_storage::playlist::linked_ads(app_state.db.pool(), display_id).await?;
    Ok(Json(ads))
}

/// DELETE /api/displays/:id/ads/:ad_id
/// Remove the ad from the playlist, along with any override for it.
pub async fn unlink_ad(
    Path((id, ad_id)): Path<(i64, String)>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<serde_json::Value>> {
    let display_id = DisplayId::new(id);
    let ad_id = AdId::new(ad_id);
    owned_display(&app_state, display_id, auth.user_id()).await?;

    adboard_storage::playlist::unlink(app_state.db.pool(), display_id, &ad_id).await?;

    publish_display_updated(app_state.hub.clone(), display_id);

    Ok(Json(serde_json::json!({ "success": true })))
}

/// PATCH/PUT /api/displays/:id/ads/order
/// Replace the playlist with the given order. Every id must already be
/// linked; ids left out are dropped from the playlist (their overrides
/// survive and reattach if the ad is linked again).
pub async fn reorder(
    Path(id): Path<i64>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<Vec<Ad>>> {
    let display_id = DisplayId::new(id);
    owned_display(&app_state, display_id, auth.user_id()).await?;

    adboard_storage::playlist::reorder(app_state.db.pool(), display_id, &req.order).await?;

    publish_display_updated(app_state.hub.clone(), display_id);

    let ads = adboard_storage::playlist::linked_ads(app_state.db.pool(), display_id).await?;
    Ok(Json(ads))
}

/// PATCH /api/displays/:id/ads/:ad_id/override
/// Set or update the per-display override for a linked ad. Absent fields
/// keep their current (or seeded) values. Intentionally publishes no
/// event: players pick the override up on their next refresh.
pub async fn set_override(
    Path((id, ad_id)): Path<(i64, String)>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(patch): Json<OverridePatch>,
) -> Result<Json<AdOverride>> {
    let display_id = DisplayId::new(id);
    let ad_id = AdId::new(ad_id);
    owned_display(&app_state, display_id, auth.user_id()).await?;

    let ad_override =
        adboard_storage::playlist::set_override(app_state.db.pool(), display_id, &ad_id, patch)
            .await?;

    Ok(Json(ad_override))
}
