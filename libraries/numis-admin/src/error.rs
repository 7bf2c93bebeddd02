//! Error types for the admin panel

use crate::i18n::MessageKey;
use thiserror::Error;

/// Draft validation failures, checked in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name is empty after trimming
    #[error("name is required")]
    NameRequired,

    /// The price list is empty
    #[error("at least one price is required")]
    PriceRequired,

    /// No price parses to an amount greater than zero
    #[error("at least one valid price greater than 0 is required")]
    ValidPriceRequired,

    /// Neither staged nor existing images
    #[error("at least one image is required")]
    ImageRequired,
}

impl ValidationError {
    /// Message shown to the user for this failure
    pub fn message_key(self) -> MessageKey {
        match self {
            Self::NameRequired => MessageKey::NameRequired,
            Self::PriceRequired => MessageKey::PriceRequired,
            Self::ValidPriceRequired => MessageKey::ValidPriceRequired,
            Self::ImageRequired => MessageKey::ImageRequired,
        }
    }
}

/// Draft edits that were refused; the draft is left unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    /// Adding the files would exceed the image limit
    #[error("a coin can have at most {limit} images")]
    MaxImages { limit: usize },
}

impl DraftError {
    /// Message shown to the user for this failure
    pub fn message_key(self) -> MessageKey {
        match self {
            Self::MaxImages { .. } => MessageKey::MaxImages,
        }
    }
}

/// Why a submit attempt ended without saving
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Local validation failed; nothing reached the network
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An image upload failed
    #[error("error uploading image")]
    Upload,

    /// The record write failed; uploads of this attempt were rolled back
    #[error("{0}")]
    Adapter(String),

    /// Anything else
    #[error("unexpected error: {0}")]
    Unexpected(String),
}
