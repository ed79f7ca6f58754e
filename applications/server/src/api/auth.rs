/// Authentication API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use adboard_core::{User, UserId};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
}

/// POST /api/auth/register
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    if req.email.is_empty() || !req.email.contains('@') {
        return Err(ServerError::BadRequest("Invalid email".to_string()));
    }
    if req.password.is_empty() {
        return Err(ServerError::BadRequest("Password is required".to_string()));
    }

    let password_hash = app_state.auth_service.hash_password(&req.password)?;

    let user = adboard_storage::users::create(
        app_state.db.pool(),
        &req.email,
        &req.name,
        &password_hash,
    )
    .await?;

    let access_token = app_state.auth_service.create_access_token(&user.id)?;
    let refresh_token = app_state.auth_service.create_refresh_token(&user.id)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user,
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let user_id = UserId::new(req.email);

    // Same error for unknown user and wrong password
    let password_hash = adboard_storage::users::get_password_hash(app_state.db.pool(), &user_id)
        .await?
        .ok_or_else(|| ServerError::Auth("Invalid email or password".to_string()))?;

    if !app_state
        .auth_service
        .verify_password(&req.password, &password_hash)?
    {
        return Err(ServerError::Auth("Invalid email or password".to_string()));
    }

    let access_token = app_state.auth_service.create_access_token(&user_id)?;
    let refresh_token = app_state.auth_service.create_refresh_token(&user_id)?;

    Ok(Json(LoginResponse {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
    }))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(app_state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>> {
    // Verify refresh token
    let user_id = app_state
        .auth_service
        .verify_refresh_token(&req.refresh_token)?;

    // Create new access token
    let access_token = app_state.auth_service.create_access_token(&user_id)?;

    Ok(Json(RefreshResponse {
        access_token,
        token_type: "Bearer".to_string(),
    }))
}
