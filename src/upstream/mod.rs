//! Upstream Module
//!
//! Transport to the external Pokemon API. The [`Upstream`] trait is the seam
//! the pokemon service depends on; [`PokeApiClient`] is the reqwest-backed
//! implementation used in production.

mod client;

use async_trait::async_trait;
use thiserror::Error;

pub use client::PokeApiClient;

// == Raw Response ==
/// Status and body of an upstream reply, uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// == Upstream Error ==
/// Failures that happen before an HTTP status is available.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// The request did not complete within the configured timeout
    #[error("request timed out")]
    Timeout,

    /// The upstream host could not be reached
    #[error("{0}")]
    Connect(String),

    /// Any other transport-level failure
    #[error("{0}")]
    Transport(String),
}

// == Upstream Trait ==
/// Issues GET requests against the upstream API.
///
/// Implementations pass status codes through untouched and never retry.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> std::result::Result<RawResponse, UpstreamError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success_covers_2xx_only() {
        assert!(RawResponse::new(200, "").is_success());
        assert!(RawResponse::new(204, "").is_success());
        assert!(!RawResponse::new(304, "").is_success());
        assert!(!RawResponse::new(404, "").is_success());
        assert!(!RawResponse::new(503, "").is_success());
    }
}
