/// Image reference type
use serde::{Deserialize, Serialize};

/// A stored image attached to a coin
///
/// `path` is the object-store key used for deletion; `url` is the public
/// address used for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef {
    /// Public URL
    pub url: String,
    /// Object storage key
    pub path: String,
}

impl ImageRef {
    /// Create a new image reference
    pub fn new(url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            path: path.into(),
        }
    }
}
