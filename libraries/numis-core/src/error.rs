/// Errors shared by every collaborator behind the core traits
use crate::types::CoinId;
use thiserror::Error;

/// Result type alias using `NumisError`
pub type Result<T> = std::result::Result<T, NumisError>;

/// Core error type for Numis Admin
#[derive(Error, Debug)]
pub enum NumisError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Object (image) storage errors
    #[error("Object storage error: {0}")]
    ObjectStorage(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Coin not found
    #[error("Coin not found: {0}")]
    CoinNotFound(CoinId),

    /// Authentication failed or session missing
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Record store backend failure
    #[error("Database error: {0}")]
    Database(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl NumisError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an object storage error
    pub fn object_storage(msg: impl Into<String>) -> Self {
        Self::ObjectStorage(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Whether this error means the entity does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::CoinNotFound(_))
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for NumisError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
