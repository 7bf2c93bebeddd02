//! Numis Server Library
//!
//! HTTP backend for the Numis admin panel: email/password sign-in with JWTs,
//! coin record CRUD over SQLite and image storage on disk.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{auth::AuthService, image_storage::ImageStorage};
pub use state::AppState;
