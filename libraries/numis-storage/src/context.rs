use crate::coins;
use async_trait::async_trait;
use numis_core::{error::Result, storage::RecordStore, types::*};
use sqlx::SqlitePool;

/// Coin record store backed by `SQLite`
#[derive(Clone)]
pub struct LocalRecordStore {
    pool: SqlitePool,
}

impl LocalRecordStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for LocalRecordStore {
    async fn create_coin(&self, payload: CoinPayload) -> Result<Coin> {
        coins::create(&self.pool, payload).await
    }

    async fn get_coin(&self, id: &CoinId) -> Result<Option<Coin>> {
        coins::get_by_id(&self.pool, id).await
    }

    async fn list_coins(&self, filter: CoinFilter) -> Result<Vec<Coin>> {
        coins::get_all(&self.pool, filter).await
    }

    async fn update_coin(&self, id: &CoinId, update: CoinUpdate) -> Result<Coin> {
        coins::update(&self.pool, id, update).await
    }

    async fn delete_coin(&self, id: &CoinId) -> Result<()> {
        coins::delete(&self.pool, id).await
    }
}
