//! Persistence adapter
//!
//! Maps CRUD intents onto a [`RecordStore`] and an [`ObjectStore`] and folds
//! every backend failure into an [`AdapterError`] carrying a display message.
//! The adapter never retries and never panics.

use numis_core::types::{Coin, CoinFilter, CoinId, CoinPayload, CoinUpdate, ImageRef};
use numis_core::{ObjectStore, RecordStore};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

/// A backend call failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AdapterError {
    pub message: String,
}

impl AdapterError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Uniform result of every adapter operation
pub type AdapterResult<T> = Result<T, AdapterError>;

/// An image file picked by the user, not yet uploaded
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Result of a successful upload
pub type Uploaded = ImageRef;

/// Front door to the record and object stores
#[derive(Clone)]
pub struct Adapter {
    records: Arc<dyn RecordStore>,
    objects: Arc<dyn ObjectStore>,
}

impl Adapter {
    pub fn new(records: Arc<dyn RecordStore>, objects: Arc<dyn ObjectStore>) -> Self {
        Self { records, objects }
    }

    /// Insert a record and return the id the store assigned
    pub async fn create_record(&self, payload: CoinPayload) -> AdapterResult<CoinId> {
        match self.records.create_coin(payload).await {
            Ok(coin) => {
                debug!(coin_id = %coin.id, "Record created");
                Ok(coin.id)
            }
            Err(e) => Err(failure("create record", e)),
        }
    }

    pub async fn update_record(&self, id: &CoinId, update: CoinUpdate) -> AdapterResult<()> {
        self.records
            .update_coin(id, update)
            .await
            .map(|_| ())
            .map_err(|e| failure("update record", e))
    }

    pub async fn delete_record(&self, id: &CoinId) -> AdapterResult<()> {
        self.records
            .delete_coin(id)
            .await
            .map_err(|e| failure("delete record", e))
    }

    /// Fetch one record; a missing record is an error
    pub async fn get_record(&self, id: &CoinId) -> AdapterResult<Coin> {
        match self.records.get_coin(id).await {
            Ok(Some(coin)) => Ok(coin),
            Ok(None) => Err(failure(
                "get record",
                numis_core::NumisError::CoinNotFound(id.clone()),
            )),
            Err(e) => Err(failure("get record", e)),
        }
    }

    /// Every record, newest first
    pub async fn list_records(&self) -> AdapterResult<Vec<Coin>> {
        self.records
            .list_coins(CoinFilter::all())
            .await
            .map_err(|e| failure("list records", e))
    }

    /// Publicly listed records only, newest first
    pub async fn list_public_records(&self) -> AdapterResult<Vec<Coin>> {
        self.records
            .list_coins(CoinFilter::active_only())
            .await
            .map_err(|e| failure("list public records", e))
    }

    /// Upload a file under `<unix_millis>_<nonce>_<sanitized name>`
    ///
    /// The nonce keeps two same-named files uploaded within one millisecond
    /// apart; object stores refuse an existing key.
    pub async fn upload_file(&self, file: &ImageFile) -> AdapterResult<Uploaded> {
        let path = storage_path(
            chrono::Utc::now().timestamp_millis(),
            &upload_nonce(),
            &file.name,
        );

        match self
            .objects
            .put_object(&path, file.bytes.clone(), &file.content_type)
            .await
        {
            Ok(url) => {
                debug!(path = %path, "File uploaded");
                Ok(ImageRef::new(url, path))
            }
            Err(e) => Err(failure("upload file", e)),
        }
    }

    pub async fn delete_file(&self, path: &str) -> AdapterResult<()> {
        self.objects
            .delete_object(path)
            .await
            .map_err(|e| failure("delete file", e))
    }
}

fn failure(operation: &str, err: numis_core::NumisError) -> AdapterError {
    error!(operation, error = %err, "Backend call failed");
    AdapterError::new(err.to_string())
}

/// Object key for an uploaded file
pub fn storage_path(unix_millis: i64, nonce: &str, file_name: &str) -> String {
    format!("{}_{}_{}", unix_millis, nonce, sanitize_file_name(file_name))
}

fn upload_nonce() -> String {
    let mut nonce = uuid::Uuid::new_v4().simple().to_string();
    nonce.truncate(12);
    nonce
}

/// Keep ASCII letters, digits, `.`, `-` and `_`; everything else becomes `_`
///
/// Directory components are dropped so a key can never escape its bucket.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);

    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = sanitized.trim_start_matches('.');
    if trimmed.is_empty() {
        "image".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_path_prefixes_timestamp_and_nonce() {
        assert_eq!(
            storage_path(1_700_000_000_000, "a1b2c3", "peso.jpg"),
            "1700000000000_a1b2c3_peso.jpg"
        );
    }

    #[test]
    fn nonces_differ_between_uploads() {
        let first = upload_nonce();
        assert_eq!(first.len(), 12);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, upload_nonce());
    }

    #[test]
    fn sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_file_name("8 reales (1780).jpg"), "8_reales__1780_.jpg");
        assert_eq!(sanitize_file_name("moneda ñ.png"), "moneda__.png");
    }

    #[test]
    fn sanitize_strips_directories_and_leading_dots() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\fotos\\a.jpg"), "a.jpg");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name(""), "image");
        assert_eq!(sanitize_file_name("..."), "image");
    }

    #[test]
    fn image_file_debug_hides_bytes() {
        let file = ImageFile::new("a.jpg", "image/jpeg", vec![0; 1024]);
        let rendered = format!("{file:?}");
        assert!(rendered.contains("size: 1024"));
    }
}
