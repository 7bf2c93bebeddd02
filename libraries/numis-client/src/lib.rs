//! Numis Server Client
//!
//! HTTP client library for the Numis Admin server API.
//!
//! # Features
//!
//! - **Authentication**: Login with email/password, token refresh, session stream
//! - **Coin records**: List, fetch, create, update and delete coins
//! - **Images**: Upload and delete coin images
//!
//! [`NumisClient`] implements the `numis-core` backend traits, so the admin
//! panel can run against a remote server without knowing about HTTP.
//!
//! # Example
//!
//! ```ignore
//! use numis_client::{ClientConfig, NumisClient};
//! use numis_core::{CoinFilter, RecordStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NumisClient::new(ClientConfig::new("https://admin.example.com"))?;
//!     client.login("admin@example.com", "secret").await?;
//!
//!     let coins = client.list_coins(CoinFilter::all()).await?;
//!     println!("Found {} coins", coins.len());
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod coins;
mod error;
mod images;
mod types;

// Re-export main types
pub use client::{CoinsClientHandle, ImagesClientHandle, NumisClient};
pub use error::{ClientError, Result};
pub use types::{
    ClientConfig, LoginResponse, RefreshTokenResponse, UploadResponse, UserInfo,
};

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
pub use coins::CoinsClient;
pub use images::ImagesClient;
