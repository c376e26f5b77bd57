//! HTTP Remote Service Adapter
//!
//! JSON-over-HTTP implementation of the RemoteService contract.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::{RemoteError, RemoteService};

// == HTTP Adapter ==
/// RemoteService adapter speaking JSON over HTTP.
///
/// Cache keys map to paths under a base URL: `fetch` issues a GET,
/// `post` a POST with a JSON body. Non-success statuses become
/// `RemoteError::Status`; undecodable bodies become
/// `RemoteError::MalformedPayload`.
#[derive(Debug, Clone)]
pub struct HttpRemoteService {
    client: Client,
    base_url: String,
}

impl HttpRemoteService {
    // == Constructor ==
    /// Creates a new adapter for the given base URL.
    ///
    /// # Arguments
    /// * `base_url` - Root URL the keys are resolved against
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a new adapter with a request timeout.
    ///
    /// A timed-out call surfaces as `RemoteError::Canceled`.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| RemoteError::Network(err.to_string()))?;

        Ok(Self::with_client(client, base_url))
    }

    /// Creates a new adapter reusing an existing client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Resolves a cache key against the base URL.
    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key.trim_start_matches('/'))
    }

    /// Maps a reqwest failure onto the adapter error taxonomy.
    fn classify(err: reqwest::Error) -> RemoteError {
        if err.is_timeout() {
            RemoteError::Canceled(err.to_string())
        } else if err.is_decode() {
            RemoteError::MalformedPayload(err.to_string())
        } else {
            RemoteError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl RemoteService for HttpRemoteService {
    type Value = Value;
    type Payload = Value;
    type Receipt = Value;

    async fn fetch(&self, key: &str) -> Result<Value, RemoteError> {
        let url = self.url_for(key);
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::classify)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<Value>().await.map_err(Self::classify)
    }

    async fn post(&self, key: &str, payload: Value) -> Result<Value, RemoteError> {
        let url = self.url_for(key);
        debug!("Posting to {}", url);

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(Self::classify)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<Value>().await.map_err(Self::classify)
    }
}
