/// Storage-specific errors
use thiserror::Error;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violated
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

impl From<StorageError> for numis_core::NumisError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity, id } => numis_core::NumisError::not_found(entity, id),
            other => numis_core::NumisError::storage(other.to_string()),
        }
    }
}
