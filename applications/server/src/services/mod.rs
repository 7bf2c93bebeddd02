/// Server services
pub mod auth;
pub mod image_storage;

pub use auth::AuthService;
pub use image_storage::ImageStorage;
