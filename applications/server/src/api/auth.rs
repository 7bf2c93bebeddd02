/// Authentication API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{extract::State, Json};
use numis_core::AuthUser;
use numis_storage::users;
use serde::{Deserialize, Serialize};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
}

impl From<AuthUser> for UserInfo {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.id.as_str().to_string(),
            email: user.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: UserInfo,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

/// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let pool = app_state.pool();

    let user = users::find_by_email(pool, &req.email)
        .await?
        .ok_or_else(|| ServerError::Auth(INVALID_CREDENTIALS.to_string()))?;

    let password_hash = users::get_password_hash(pool, &user.id)
        .await?
        .ok_or_else(|| ServerError::Auth(INVALID_CREDENTIALS.to_string()))?;

    if !app_state
        .auth_service
        .verify_password(&req.password, &password_hash)?
    {
        tracing::info!(email = %user.email, "Login rejected");
        return Err(ServerError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    let tokens = app_state.auth_service.issue_tokens(&user.id)?;
    tracing::info!(email = %user.email, "Login succeeded");

    Ok(Json(LoginResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        token_type: "Bearer".to_string(),
        user: user.into(),
    }))
}

/// POST /api/auth/refresh
///
/// Rotates both tokens. The user must still exist.
pub async fn refresh(
    State(app_state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>> {
    let user_id = app_state
        .auth_service
        .verify_refresh_token(&req.refresh_token)?;

    if users::get_by_id(app_state.pool(), &user_id).await?.is_none() {
        return Err(ServerError::Auth("User no longer exists".to_string()));
    }

    let tokens = app_state.auth_service.issue_tokens(&user_id)?;

    Ok(Json(RefreshResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        token_type: "Bearer".to_string(),
    }))
}

/// GET /api/auth/me
pub async fn me(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<UserInfo>> {
    let user = users::get_by_id(app_state.pool(), auth.user_id())
        .await?
        .ok_or_else(|| ServerError::Auth("User no longer exists".to_string()))?;
    Ok(Json(user.into()))
}
