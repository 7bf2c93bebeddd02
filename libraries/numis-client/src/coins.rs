//! Coin record operations against the Numis server.

use crate::error::{ClientError, Result};
use numis_core::types::{Coin, CoinFilter, CoinId, CoinPayload, CoinUpdate};
use reqwest::Client;
use tracing::debug;

/// Coin records client.
pub struct CoinsClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: &'a str,
}

impl<'a> CoinsClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: &'a str) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// List coins, newest first.
    pub async fn list(&self, filter: CoinFilter) -> Result<Vec<Coin>> {
        let url = format!("{}/api/coins", self.base_url);
        debug!(url = %url, active = ?filter.active, "Listing coins");

        let mut request = self.http.get(&url).bearer_auth(self.access_token);
        if let Some(active) = filter.active {
            request = request.query(&[("active", active)]);
        }

        let response = request.send().await.map_err(ClientError::from_send)?;
        parse_json(response, "coin list").await
    }

    /// Get a single coin; `None` when the server has no such record.
    pub async fn get(&self, id: &CoinId) -> Result<Option<Coin>> {
        let url = format!("{}/api/coins/{}", self.base_url, id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(self.access_token)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        match parse_json(response, "coin").await {
            Ok(coin) => Ok(Some(coin)),
            Err(ClientError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Create a coin and return the stored record.
    pub async fn create(&self, payload: &CoinPayload) -> Result<Coin> {
        let url = format!("{}/api/coins", self.base_url);
        debug!(url = %url, name = %payload.name, "Creating coin");

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.access_token)
            .json(payload)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        parse_json(response, "created coin").await
    }

    /// Apply an update and return the stored record.
    pub async fn update(&self, id: &CoinId, update: &CoinUpdate) -> Result<Coin> {
        let url = format!("{}/api/coins/{}", self.base_url, id);
        debug!(url = %url, "Updating coin");

        let response = self
            .http
            .put(&url)
            .bearer_auth(self.access_token)
            .json(update)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        parse_json(response, "updated coin").await
    }

    /// Delete a coin record.
    pub async fn delete(&self, id: &CoinId) -> Result<()> {
        let url = format!("{}/api/coins/{}", self.base_url, id);
        debug!(url = %url, "Deleting coin");

        let response = self
            .http
            .delete(&url)
            .bearer_auth(self.access_token)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ClientError::from_response(response).await)
        }
    }
}

async fn parse_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    what: &str,
) -> Result<T> {
    if response.status().is_success() {
        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse {}: {}", what, e)))
    } else {
        Err(ClientError::from_response(response).await)
    }
}
