//! Authentication context
//!
//! [`AuthContext`] follows an [`AuthProvider`]'s session stream in a
//! background task and keeps the latest user. Pages read it through
//! [`AuthContext::current_user`] or subscribe with [`AuthContext::changes`].

use numis_core::types::AuthUser;
use numis_core::AuthProvider;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

pub struct AuthContext {
    provider: Arc<dyn AuthProvider>,
    tx: Arc<watch::Sender<Option<AuthUser>>>,
    rx: watch::Receiver<Option<AuthUser>>,
    follower: Option<JoinHandle<()>>,
}

impl AuthContext {
    /// Subscribe to the provider and start following its session
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(provider: Arc<dyn AuthProvider>) -> Self {
        let mut upstream = provider.subscribe();
        let initial = upstream.borrow_and_update().clone();
        let (tx, rx) = watch::channel(initial);
        let tx = Arc::new(tx);

        let forward = Arc::clone(&tx);
        let follower = tokio::spawn(async move {
            while upstream.changed().await.is_ok() {
                let user = upstream.borrow_and_update().clone();
                debug!(signed_in = user.is_some(), "Session changed");
                forward.send_replace(user);
            }
        });

        Self {
            provider,
            tx,
            rx,
            follower: Some(follower),
        }
    }

    /// Sign in; the new user is visible immediately
    pub async fn sign_in(&self, email: &str, password: &str) -> numis_core::Result<AuthUser> {
        let user = self.provider.sign_in(email, password).await?;
        info!(email = %user.email, "Signed in");
        self.tx.send_replace(Some(user.clone()));
        Ok(user)
    }

    pub async fn sign_out(&self) -> numis_core::Result<()> {
        self.provider.sign_out().await?;
        info!("Signed out");
        self.tx.send_replace(None);
        Ok(())
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.rx.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.rx.borrow().is_some()
    }

    /// Receive every session change
    pub fn changes(&self) -> watch::Receiver<Option<AuthUser>> {
        self.rx.clone()
    }

    /// Stop following the provider; the last known user is kept
    pub fn shutdown(&mut self) {
        if let Some(follower) = self.follower.take() {
            follower.abort();
            debug!("Auth context stopped");
        }
    }
}

impl Drop for AuthContext {
    fn drop(&mut self) {
        self.shutdown();
    }
}
