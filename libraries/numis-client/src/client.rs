//! Main Numis server client.

use crate::auth::AuthClient;
use crate::coins::CoinsClient;
use crate::error::{ClientError, Result};
use crate::images::ImagesClient;
use crate::types::{ClientConfig, LoginResponse, RefreshTokenResponse};
use async_trait::async_trait;
use numis_core::types::{AuthUser, Coin, CoinFilter, CoinId, CoinPayload, CoinUpdate};
use numis_core::{AuthProvider, ObjectStore, RecordStore, SessionWatch};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

/// Main client for interacting with a Numis server.
///
/// The client handles authentication and token refresh, publishes session
/// changes, and implements the backend traits used by the admin panel
/// ([`AuthProvider`], [`RecordStore`], [`ObjectStore`]).
///
/// # Example
///
/// ```ignore
/// use numis_client::{ClientConfig, NumisClient};
///
/// let client = NumisClient::new(ClientConfig::new("https://admin.example.com"))?;
/// let login = client.login("admin@example.com", "secret").await?;
/// println!("Logged in as {}", login.user.email);
///
/// let coins = client.coins().await?.client().list(Default::default()).await?;
/// println!("Found {} coins", coins.len());
/// ```
pub struct NumisClient {
    http: Client,
    config: Arc<RwLock<ClientConfig>>,
    session: watch::Sender<Option<AuthUser>>,
}

impl NumisClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let normalized_config = ClientConfig {
            url,
            access_token: config.access_token,
            refresh_token: config.refresh_token,
        };

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("NumisAdmin/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        let (session, _) = watch::channel(None);

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(normalized_config)),
            session,
        })
    }

    /// Get the server URL.
    pub async fn url(&self) -> String {
        self.config.read().await.url.clone()
    }

    /// Check if the client has an access token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.access_token.is_some()
    }

    /// Login with email and password.
    ///
    /// On success, the tokens are stored for subsequent requests and the
    /// signed-in user is published to session subscribers.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let url = self.url().await;

        let auth_client = AuthClient::new(&self.http, &url);
        let response = auth_client.login(email, password).await?;

        {
            let mut config = self.config.write().await;
            config.access_token = Some(response.access_token.clone());
            config.refresh_token = Some(response.refresh_token.clone());
        }

        self.session
            .send_replace(Some(AuthUser::from(response.user.clone())));

        Ok(response)
    }

    /// Set tokens directly (e.g., from stored credentials).
    ///
    /// Call [`NumisClient::restore_session`] afterwards to publish the user.
    pub async fn set_tokens(&self, access_token: String, refresh_token: Option<String>) {
        let mut config = self.config.write().await;
        config.access_token = Some(access_token);
        config.refresh_token = refresh_token;
    }

    /// Get the current tokens.
    pub async fn get_tokens(&self) -> (Option<String>, Option<String>) {
        let config = self.config.read().await;
        (config.access_token.clone(), config.refresh_token.clone())
    }

    /// Clear stored tokens and publish the signed-out state.
    pub async fn logout(&self) {
        {
            let mut config = self.config.write().await;
            config.access_token = None;
            config.refresh_token = None;
        }
        self.session.send_replace(None);
        info!("Logged out");
    }

    /// Resolve the user behind the stored access token and publish it.
    ///
    /// Returns `None` (and publishes the signed-out state) when there is no
    /// token or the server rejects it.
    pub async fn restore_session(&self) -> Result<Option<AuthUser>> {
        let (access_token, url) = {
            let config = self.config.read().await;
            (config.access_token.clone(), config.url.clone())
        };

        let Some(access_token) = access_token else {
            self.session.send_replace(None);
            return Ok(None);
        };

        let auth_client = AuthClient::new(&self.http, &url);
        match auth_client.get_current_user(&access_token).await {
            Ok(info) => {
                let user = AuthUser::from(info);
                self.session.send_replace(Some(user.clone()));
                Ok(Some(user))
            }
            Err(ClientError::AuthRequired) => {
                self.session.send_replace(None);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Refresh the access token using the refresh token.
    pub async fn refresh_token(&self) -> Result<RefreshTokenResponse> {
        let (refresh_token, url) = {
            let config = self.config.read().await;
            let refresh_token = config
                .refresh_token
                .clone()
                .ok_or(ClientError::AuthRequired)?;
            (refresh_token, config.url.clone())
        };

        let auth_client = AuthClient::new(&self.http, &url);
        let response = auth_client.refresh_token(&refresh_token).await?;

        let mut config = self.config.write().await;
        config.access_token = Some(response.access_token.clone());
        config.refresh_token = Some(response.refresh_token.clone());

        Ok(response)
    }

    /// Get a coins client.
    ///
    /// Returns an error if not authenticated.
    pub async fn coins(&self) -> Result<CoinsClientHandle> {
        let (url, access_token) = self.credentials().await?;
        Ok(CoinsClientHandle {
            http: self.http.clone(),
            url,
            access_token,
        })
    }

    /// Get an images client.
    ///
    /// Returns an error if not authenticated.
    pub async fn images(&self) -> Result<ImagesClientHandle> {
        let (url, access_token) = self.credentials().await?;
        Ok(ImagesClientHandle {
            http: self.http.clone(),
            url,
            access_token,
        })
    }

    async fn credentials(&self) -> Result<(String, String)> {
        let config = self.config.read().await;
        let access_token = config
            .access_token
            .clone()
            .ok_or(ClientError::AuthRequired)?;
        Ok((config.url.clone(), access_token))
    }

    /// Execute an operation with automatic token refresh on 401.
    ///
    /// If the operation fails with `AuthRequired`, attempts to refresh
    /// the token and retry once. A failed refresh ends the session.
    pub async fn with_auto_refresh<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        match operation().await {
            Ok(result) => Ok(result),
            Err(ClientError::AuthRequired) => {
                warn!("Token expired, attempting refresh");

                if let Err(e) = self.refresh_token().await {
                    self.logout().await;
                    return Err(e);
                }

                operation().await
            }
            Err(e) => Err(e),
        }
    }
}

/// Handle for coin operations.
pub struct CoinsClientHandle {
    http: Client,
    url: String,
    access_token: String,
}

impl CoinsClientHandle {
    /// Get the coins client.
    pub fn client(&self) -> CoinsClient<'_> {
        CoinsClient::new(&self.http, &self.url, &self.access_token)
    }
}

/// Handle for image operations.
pub struct ImagesClientHandle {
    http: Client,
    url: String,
    access_token: String,
}

impl ImagesClientHandle {
    /// Get the images client.
    pub fn client(&self) -> ImagesClient<'_> {
        ImagesClient::new(&self.http, &self.url, &self.access_token)
    }
}

#[async_trait]
impl AuthProvider for NumisClient {
    async fn sign_in(&self, email: &str, password: &str) -> numis_core::Result<AuthUser> {
        let response = self.login(email, password).await?;
        Ok(AuthUser::from(response.user))
    }

    async fn sign_out(&self) -> numis_core::Result<()> {
        self.logout().await;
        Ok(())
    }

    fn subscribe(&self) -> SessionWatch {
        self.session.subscribe()
    }
}

#[async_trait]
impl RecordStore for NumisClient {
    async fn create_coin(&self, payload: CoinPayload) -> numis_core::Result<Coin> {
        let payload = &payload;
        let coin = self
            .with_auto_refresh(|| async move { self.coins().await?.client().create(payload).await })
            .await?;
        Ok(coin)
    }

    async fn get_coin(&self, id: &CoinId) -> numis_core::Result<Option<Coin>> {
        let coin = self
            .with_auto_refresh(|| async move { self.coins().await?.client().get(id).await })
            .await?;
        Ok(coin)
    }

    async fn list_coins(&self, filter: CoinFilter) -> numis_core::Result<Vec<Coin>> {
        let coins = self
            .with_auto_refresh(|| async move { self.coins().await?.client().list(filter).await })
            .await?;
        debug!(count = coins.len(), "Fetched coins");
        Ok(coins)
    }

    async fn update_coin(&self, id: &CoinId, update: CoinUpdate) -> numis_core::Result<Coin> {
        let update = &update;
        let coin = self
            .with_auto_refresh(|| async move {
                self.coins().await?.client().update(id, update).await
            })
            .await?;
        Ok(coin)
    }

    async fn delete_coin(&self, id: &CoinId) -> numis_core::Result<()> {
        self.with_auto_refresh(|| async move { self.coins().await?.client().delete(id).await })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for NumisClient {
    async fn put_object(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> numis_core::Result<String> {
        let bytes = &bytes;
        let uploaded = self
            .with_auto_refresh(|| async move {
                self.images()
                    .await?
                    .client()
                    .upload(path, bytes.clone(), content_type)
                    .await
            })
            .await?;
        Ok(uploaded.url)
    }

    async fn delete_object(&self, path: &str) -> numis_core::Result<()> {
        self.with_auto_refresh(|| async move { self.images().await?.client().delete(path).await })
            .await?;
        Ok(())
    }
}
