//! Error types for the Numis server client.

use numis_core::NumisError;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when interacting with a Numis server.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Authentication required but no token available
    #[error("Authentication required")]
    AuthRequired,

    /// Authentication failed (invalid credentials)
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Token refresh failed
    #[error("Token refresh failed: {0}")]
    TokenRefreshFailed(String),

    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ClientError {
    /// Classify a transport failure.
    pub(crate) fn from_send(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            Self::ServerUnreachable(e.to_string())
        } else {
            Self::Request(e)
        }
    }

    /// Build an error from a non-success response.
    ///
    /// The server answers errors with `{"error": "..."}`; anything else is
    /// kept as raw text.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);

        match status {
            401 => Self::AuthRequired,
            404 => Self::NotFound(message),
            _ => Self::ServerError { status, message },
        }
    }
}

impl From<ClientError> for NumisError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::AuthRequired
            | ClientError::AuthFailed(_)
            | ClientError::TokenRefreshFailed(_) => NumisError::auth(err.to_string()),
            ClientError::NotFound(what) => NumisError::not_found("Resource", what),
            ClientError::Request(_) | ClientError::ServerUnreachable(_) => {
                NumisError::network(err.to_string())
            }
            ClientError::InvalidUrl(msg) => NumisError::invalid_input(msg),
            ClientError::ServerError { message, .. } => NumisError::storage(message),
            ClientError::ParseError(msg) => NumisError::Other(msg),
        }
    }
}
