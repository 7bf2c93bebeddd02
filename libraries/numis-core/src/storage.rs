//! Storage traits for coin records and images

use crate::error::Result;
use crate::types::{Coin, CoinFilter, CoinId, CoinPayload, CoinUpdate};
use async_trait::async_trait;

/// Row storage for coin records
///
/// This trait abstracts the relational backend so the admin panel can run
/// against the local `SQLite` store or a remote API.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new coin; the store assigns `id` and `created_at`
    async fn create_coin(&self, payload: CoinPayload) -> Result<Coin>;

    /// Get a coin by ID
    async fn get_coin(&self, id: &CoinId) -> Result<Option<Coin>>;

    /// List coins, newest first
    async fn list_coins(&self, filter: CoinFilter) -> Result<Vec<Coin>>;

    /// Apply a partial update and return the stored result
    async fn update_coin(&self, id: &CoinId, update: CoinUpdate) -> Result<Coin>;

    /// Delete a coin record (images are not touched)
    async fn delete_coin(&self, id: &CoinId) -> Result<()>;
}

/// Object storage for image files
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store bytes under `path` and return the object's public URL
    async fn put_object(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String>;

    /// Remove the object stored under `path`
    async fn delete_object(&self, path: &str) -> Result<()>;
}
