//! Revocable preview handles for staged image files
//!
//! A [`PreviewHandle`] stands in for a locally generated preview URL. It is
//! revoked when dropped, so removing a staged file or dropping the whole
//! form releases its previews.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Issues preview handles and counts the live ones
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    inner: Arc<RegistryInner>,
}

#[derive(Debug, Default)]
struct RegistryInner {
    next_id: AtomicU64,
    live: AtomicUsize,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a preview for a file name
    pub fn allocate(&self, file_name: &str) -> PreviewHandle {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.live.fetch_add(1, Ordering::AcqRel);
        tracing::trace!(id, file = %file_name, "Preview allocated");

        PreviewHandle {
            url: format!("preview://{id}/{file_name}"),
            registry: Arc::clone(&self.inner),
        }
    }

    /// Number of handles not yet revoked
    pub fn live(&self) -> usize {
        self.inner.live.load(Ordering::Acquire)
    }
}

/// A live preview; revoked on drop
#[derive(Debug)]
pub struct PreviewHandle {
    url: String,
    registry: Arc<RegistryInner>,
}

impl PreviewHandle {
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.registry.live.fetch_sub(1, Ordering::AcqRel);
        tracing::trace!(url = %self.url, "Preview revoked");
    }
}
