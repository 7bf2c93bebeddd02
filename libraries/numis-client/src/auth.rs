//! Authentication methods for the Numis server.

use crate::error::{ClientError, Result};
use crate::types::{
    LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse, UserInfo,
};
use reqwest::Client;
use tracing::{debug, info, warn};

/// Authentication client for the Numis server.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Login with email and password.
    ///
    /// Returns tokens on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let url = format!("{}/api/auth/login", self.base_url);
        debug!(url = %url, email = %email, "Attempting login");

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();

        if status.is_success() {
            let login_response: LoginResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse login response: {}", e))
            })?;

            info!(
                email = %login_response.user.email,
                user_id = %login_response.user.id,
                "Login successful"
            );

            Ok(login_response)
        } else if status.as_u16() == 401 {
            warn!(status = %status, "Login failed: invalid credentials");
            Err(ClientError::AuthFailed(
                "Invalid email or password".to_string(),
            ))
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    /// Refresh an expired access token using the refresh token.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<RefreshTokenResponse> {
        let url = format!("{}/api/auth/refresh", self.base_url);
        debug!(url = %url, "Refreshing access token");

        let request = RefreshTokenRequest {
            refresh_token: refresh_token.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();

        if status.is_success() {
            let refresh_response: RefreshTokenResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse refresh response: {}", e))
            })?;

            debug!("Token refresh successful");
            Ok(refresh_response)
        } else if status.as_u16() == 401 {
            warn!("Token refresh failed: refresh token expired or invalid");
            Err(ClientError::TokenRefreshFailed(
                "Refresh token expired or invalid".to_string(),
            ))
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    /// Get current user info using an access token.
    pub async fn get_current_user(&self, access_token: &str) -> Result<UserInfo> {
        let url = format!("{}/api/auth/me", self.base_url);
        debug!(url = %url, "Getting current user info");

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse user info: {}", e))
            })
        } else {
            Err(ClientError::from_response(response).await)
        }
    }
}
