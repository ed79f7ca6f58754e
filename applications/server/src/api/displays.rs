/// Displays API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use adboard_core::{CreateDisplay, Display, DisplayId, UpdateDisplay, UserId};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateDisplayRequest {
    pub name: String,
    pub location: String,
    pub kind: String,
}

/// Fetch a display and verify the caller owns it
pub(crate) async fn owned_display(
    app_state: &AppState,
    display_id: DisplayId,
    caller: &UserId,
) -> Result<Display> {
    let display = adboard_storage::displays::get(app_state.db.pool(), display_id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Display not found: {}", display_id)))?;

    if &display.owner != caller {
        return Err(ServerError::Forbidden(
            "Display does not belong to you".to_string(),
        ));
    }

    Ok(display)
}

/// GET /api/displays
pub async fn list_displays(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<Display>>> {
    let displays = adboard_storage::displays::get_all(app_state.db.pool()).await?;
    Ok(Json(displays))
}

/// GET /api/displays/mine
pub async fn list_my_displays(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<Display>>> {
    let displays =
        adboard_storage::displays::get_by_owner(app_state.db.pool(), auth.user_id()).await?;
    Ok(Json(displays))
}

/// GET /api/displays/:id
pub async fn get_display(
    Path(id): Path<i64>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Display>> {
    let display_id = DisplayId::new(id);
    let display = adboard_storage::displays::get(app_state.db.pool(), display_id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Display not found: {}", display_id)))?;
    Ok(Json(display))
}

/// POST /api/displays
pub async fn create_display(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CreateDisplayRequest>,
) -> Result<(StatusCode, Json<Display>)> {
    if req.name.is_empty() {
        return Err(ServerError::BadRequest("Name is required".to_string()));
    }

    let display = adboard_storage::displays::create(
        app_state.db.pool(),
        CreateDisplay {
            name: req.name,
            location: req.location,
            kind: req.kind,
            owner: auth.user_id().clone(),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(display)))
}

/// PUT /api/displays/:id
pub async fn update_display(
    Path(id): Path<i64>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(update): Json<UpdateDisplay>,
) -> Result<Json<Display>> {
    let display_id = DisplayId::new(id);
    owned_display(&app_state, display_id, auth.user_id()).await?;

    let display =
        adboard_storage::displays::update(app_state.db.pool(), display_id, update).await?;
    Ok(Json(display))
}

/// DELETE /api/displays/:id
/// Removes the display along with its playlist rows and overrides.
pub async fn delete_display(
    Path(id): Path<i64>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<serde_json::Value>> {
    let display_id = DisplayId::new(id);
    owned_display(&app_state, display_id, auth.user_id()).await?;

    adboard_storage::displays::delete(app_state.db.pool(), display_id).await?;

    Ok(Json(serde_json::json!({ "success": true })))
}
