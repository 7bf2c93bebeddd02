/// Core traits for Numis Admin
use crate::error::Result;
use crate::types::AuthUser;
use async_trait::async_trait;
use tokio::sync::watch;

/// Stream of session changes: the current user, or `None` when signed out
pub type SessionWatch = watch::Receiver<Option<AuthUser>>;

/// Authentication provider
///
/// Implementers sign administrators in and out and publish every session
/// change to subscribers.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Sign in with email and password
    ///
    /// # Errors
    /// Returns an error if the credentials are rejected or the provider is unreachable
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser>;

    /// End the current session
    async fn sign_out(&self) -> Result<()>;

    /// Subscribe to session changes
    ///
    /// The receiver starts with the current session value.
    fn subscribe(&self) -> SessionWatch;
}
