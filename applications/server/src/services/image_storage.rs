/// Image storage service - keeps uploaded coin images on disk
use crate::error::{Result, ServerError};
use async_trait::async_trait;
use numis_core::ObjectStore;
use std::path::{Path, PathBuf};
use tokio::{fs, io::AsyncWriteExt};

/// A stored image: where it lives and where it is served from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub path: String,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct ImageStorage {
    base_path: PathBuf,
    public_url: String,
}

impl ImageStorage {
    /// `public_url` is the server's externally visible base, e.g. `https://numis.example`
    pub fn new(base_path: PathBuf, public_url: impl Into<String>) -> Self {
        Self {
            base_path,
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create the storage directory
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Public URL of a stored image
    pub fn public_url(&self, path: &str) -> String {
        format!("{}/images/{}", self.public_url, path)
    }

    /// Store `data` under `requested`, returning the normalized key
    ///
    /// Keys are flat file names. An existing key is refused with
    /// [`ServerError::Conflict`], never overwritten.
    pub async fn store(&self, requested: &str, data: &[u8]) -> Result<StoredImage> {
        let key = normalize_key(requested)?;
        let path = self.base_path.join(&key);

        fs::create_dir_all(&self.base_path).await?;
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(ServerError::Conflict(format!("Image already exists: {key}")));
            }
            Err(e) => return Err(e.into()),
        };
        if let Err(e) = write_all(&mut file, data).await {
            // Do not leave a truncated file holding the key
            let _ = fs::remove_file(&path).await;
            return Err(e.into());
        }
        tracing::debug!(key = %key, size = data.len(), "Image stored");

        Ok(StoredImage {
            url: self.public_url(&key),
            path: key,
        })
    }

    /// Delete a stored image
    pub async fn delete(&self, key: &str) -> Result<()> {
        let key = normalize_key(key)?;
        let path = self.base_path.join(&key);

        if !path.exists() {
            return Err(ServerError::NotFound(format!("Image not found: {key}")));
        }
        self.validate_path(&path)?;

        fs::remove_file(&path).await?;
        tracing::debug!(key = %key, "Image deleted");
        Ok(())
    }

    pub fn exists(&self, key: &str) -> bool {
        normalize_key(key)
            .map(|key| self.base_path.join(key).is_file())
            .unwrap_or(false)
    }

    /// Validate that a path is within the storage directory (prevent directory traversal)
    pub fn validate_path(&self, path: &Path) -> Result<()> {
        let canonical_base = self
            .base_path
            .canonicalize()
            .map_err(|e| ServerError::Storage(format!("Invalid base path: {}", e)))?;

        let canonical_path = path
            .canonicalize()
            .map_err(|e| ServerError::Storage(format!("Invalid path: {}", e)))?;

        if !canonical_path.starts_with(&canonical_base) {
            return Err(ServerError::Unauthorized(
                "Path traversal attempt detected".to_string(),
            ));
        }

        Ok(())
    }
}

async fn write_all(file: &mut fs::File, data: &[u8]) -> std::io::Result<()> {
    file.write_all(data).await?;
    file.sync_all().await
}

/// Reduce a requested key to a safe flat file name
///
/// Keys may only contain ASCII letters, digits, `.`, `-` and `_`, and may not
/// start with a dot.
pub fn normalize_key(requested: &str) -> Result<String> {
    let key = requested.trim();
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));

    if valid {
        Ok(key.to_string())
    } else {
        Err(ServerError::BadRequest(format!("Invalid image path: {requested}")))
    }
}

/// Content type for a stored key, from its extension
pub fn content_type_for(key: &str) -> String {
    mime_guess::from_path(key)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

#[async_trait]
impl ObjectStore for ImageStorage {
    async fn put_object(
        &self,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> numis_core::Result<String> {
        Ok(self.store(path, &bytes).await?.url)
    }

    async fn delete_object(&self, path: &str) -> numis_core::Result<()> {
        Ok(self.delete(path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_and_delete() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = ImageStorage::new(temp_dir.path().to_path_buf(), "http://localhost:8080/");
        storage.initialize().await.unwrap();

        let stored = storage
            .store("1700000000000_peso.jpg", b"jpeg bytes")
            .await
            .unwrap();
        assert_eq!(stored.path, "1700000000000_peso.jpg");
        assert_eq!(
            stored.url,
            "http://localhost:8080/images/1700000000000_peso.jpg"
        );
        assert!(storage.exists(&stored.path));

        storage.delete(&stored.path).await.unwrap();
        assert!(!storage.exists(&stored.path));
        assert!(matches!(
            storage.delete(&stored.path).await,
            Err(ServerError::NotFound(_))
        ));
    }

    #[test]
    fn keys_must_be_flat_names() {
        assert!(normalize_key("1_a.jpg").is_ok());
        assert!(normalize_key("../secret").is_err());
        assert!(normalize_key("dir/a.jpg").is_err());
        assert!(normalize_key(".hidden").is_err());
        assert!(normalize_key("").is_err());
        assert!(normalize_key("moneda ñ.jpg").is_err());
    }

    #[test]
    fn content_type_from_extension() {
        assert_eq!(content_type_for("a.jpg"), "image/jpeg");
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("a"), "application/octet-stream");
    }

    #[tokio::test]
    async fn object_store_reports_missing_as_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = ImageStorage::new(temp_dir.path().to_path_buf(), "http://x");
        storage.initialize().await.unwrap();

        let url = storage
            .put_object("a.png", vec![1, 2, 3], "image/png")
            .await
            .unwrap();
        assert_eq!(url, "http://x/images/a.png");

        storage.delete_object("a.png").await.unwrap();
        let err = storage.delete_object("a.png").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn existing_key_is_refused_and_kept() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = ImageStorage::new(temp_dir.path().to_path_buf(), "http://x");
        storage.initialize().await.unwrap();

        storage.store("1_IMG_0001.jpg", b"first").await.unwrap();
        let result = storage.store("1_IMG_0001.jpg", b"second").await;

        assert!(matches!(result, Err(ServerError::Conflict(_))));
        let kept = std::fs::read(temp_dir.path().join("1_IMG_0001.jpg")).unwrap();
        assert_eq!(kept, b"first");
    }
}
