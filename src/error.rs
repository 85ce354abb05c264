//! Error types for the proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::upstream::UpstreamError;

// == Proxy Error Enum ==
/// Unified error type for the proxy service and its HTTP boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    /// Upstream explicitly reported that the item does not exist
    #[error("{0}")]
    NotFound(String),

    /// Any other upstream failure: bad status, timeout, network, bad payload
    #[error("{0}")]
    Service(String),

    /// Malformed request parameters, rejected before any upstream call
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Caller failed the authentication gate
    #[error("Not authenticated")]
    Unauthorized,
}

impl ProxyError {
    /// Builds the error for an upstream 404.
    pub fn pokemon_not_found() -> Self {
        ProxyError::NotFound("Pokemon not found".to_string())
    }

    /// Builds the error for any other non-2xx upstream status.
    pub fn upstream_status(status: u16) -> Self {
        ProxyError::Service(format!("PokeAPI returned status {}", status))
    }

    /// Collapses a not-found into a service failure.
    ///
    /// The list endpoint only distinguishes "worked" from "upstream unavailable".
    pub fn into_service(self) -> Self {
        match self {
            ProxyError::NotFound(msg) => ProxyError::Service(msg),
            other => other,
        }
    }
}

impl From<UpstreamError> for ProxyError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Timeout => {
                ProxyError::Service("Request timeout - PokeAPI is not responding".to_string())
            }
            UpstreamError::Connect(msg) | UpstreamError::Transport(msg) => {
                ProxyError::Service(format!("Network error: {}", msg))
            }
        }
    }
}

impl From<serde_json::Error> for ProxyError {
    fn from(err: serde_json::Error) -> Self {
        ProxyError::Service(format!("Unexpected error: {}", err))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ProxyError::NotFound(_) => (StatusCode::NOT_FOUND, "Pokemon not found".to_string()),
            ProxyError::Service(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("PokeAPI error: {}", msg),
            ),
            ProxyError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ProxyError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;
