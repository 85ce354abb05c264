//! PokeAPI HTTP client
//!
//! reqwest-backed [`Upstream`] with a bounded per-request timeout.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{RawResponse, Upstream, UpstreamError};
use crate::config::Config;

/// HTTP client for the PokeAPI REST endpoints.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl PokeApiClient {
    /// Creates a client rooted at `base_url` whose requests give up after `timeout`.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> std::result::Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pokedex_proxy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from the proxy configuration.
    pub fn from_config(config: &Config) -> std::result::Result<Self, UpstreamError> {
        Self::new(config.pokeapi_base_url.clone(), config.upstream_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Upstream for PokeApiClient {
    async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> std::result::Result<RawResponse, UpstreamError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!(url = %url, ?query, "upstream GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;

        Ok(RawResponse { status, body })
    }
}

/// Sorts a reqwest failure into the upstream error kinds.
fn classify(err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout
    } else if err.is_connect() {
        UpstreamError::Connect(err.to_string())
    } else {
        UpstreamError::Transport(err.to_string())
    }
}
