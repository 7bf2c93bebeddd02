//! Numis Core
//!
//! Platform-agnostic domain types, traits, and error handling for Numis Admin.
//!
//! This crate provides the building blocks shared by the storage layer, the
//! HTTP server, the HTTP client, and the admin panel logic.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Coin`, `Price`, `ImageRef`, `AuthUser`, etc.
//! - **Backend Traits**: `RecordStore`, `ObjectStore`, `AuthProvider`
//! - **Reference Data**: currencies, orientations, countries
//! - **Error Handling**: Unified `NumisError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use numis_core::types::{CoinPayload, CurrencyCode, ImageRef, Price};
//!
//! let payload = CoinPayload {
//!     name: "Peso 1995".to_string(),
//!     prices: vec![Price::new(100.0, CurrencyCode::Ars)],
//!     stock: 3,
//!     active: true,
//!     images: vec![ImageRef::new("https://cdn/1.jpg", "1_peso.jpg")],
//!     ..CoinPayload::default()
//! };
//!
//! assert!(payload.is_consistent());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod money;
pub mod reference;
pub mod storage;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{NumisError, Result};
pub use storage::{ObjectStore, RecordStore};
pub use traits::{AuthProvider, SessionWatch};

pub use types::{
    AuthUser, Coin, CoinDetails, CoinFilter, CoinId, CoinPayload, CoinUpdate, CurrencyCode,
    ImageRef, Orientation, Price, UserId,
};
