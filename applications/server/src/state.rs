/// Shared application state
use crate::services::{AuthService, ImageStorage};
use numis_storage::LocalRecordStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<LocalRecordStore>,
    pub auth_service: Arc<AuthService>,
    pub image_storage: Arc<ImageStorage>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        records: Arc<LocalRecordStore>,
        auth_service: Arc<AuthService>,
        image_storage: Arc<ImageStorage>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            records,
            auth_service,
            image_storage,
            max_upload_bytes,
        }
    }

    pub fn pool(&self) -> &sqlx::SqlitePool {
        self.records.pool()
    }
}
