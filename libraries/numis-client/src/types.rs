//! Types for Numis server API requests and responses.

use numis_core::types::{AuthUser, UserId};
use serde::{Deserialize, Serialize};

/// Configuration for connecting to a Numis server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the server (e.g., "https://admin.example.com")
    pub url: String,
    /// Current access token (if authenticated)
    pub access_token: Option<String>,
    /// Refresh token for obtaining new access tokens
    pub refresh_token: Option<String>,
}

impl ClientConfig {
    /// Create a new config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: None,
            refresh_token: None,
        }
    }

    /// Create a config with existing tokens.
    pub fn with_tokens(
        url: impl Into<String>,
        access_token: impl Into<String>,
        refresh_token: Option<String>,
    ) -> Self {
        Self {
            url: url.into(),
            access_token: Some(access_token.into()),
            refresh_token,
        }
    }
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Request body for login endpoint.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response from successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: UserInfo,
}

/// Request body for token refresh.
#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Response from token refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

/// Current user info.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
}

impl From<UserInfo> for AuthUser {
    fn from(info: UserInfo) -> Self {
        AuthUser::new(UserId::new(info.id), info.email)
    }
}

// =============================================================================
// Image Types
// =============================================================================

/// Response from an image upload.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub url: String,
    pub path: String,
}
