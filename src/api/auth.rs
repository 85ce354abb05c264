//! Authentication gate
//!
//! Callers are checked before any pokemon or cache route runs. Issuing
//! credentials is someone else's job; this layer only answers yes or no.

use std::collections::HashSet;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use super::handlers::AppState;
use crate::error::{ProxyError, Result};

/// Decides whether a request's headers identify an authenticated caller.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, headers: &HeaderMap) -> bool;
}

// == Bearer Token Auth ==
/// Accepts `Authorization: Bearer <token>` for a fixed set of tokens.
#[derive(Debug, Clone, Default)]
pub struct BearerTokenAuth {
    tokens: HashSet<String>,
}

impl BearerTokenAuth {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }
}

impl Authenticator for BearerTokenAuth {
    fn authenticate(&self, headers: &HeaderMap) -> bool {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| self.tokens.contains(token.trim()))
            .unwrap_or(false)
    }
}

/// Middleware rejecting unauthenticated callers with 401.
pub async fn require_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response> {
    if !state.auth.authenticate(req.headers()) {
        debug!(path = %req.uri().path(), "rejected unauthenticated request");
        return Err(ProxyError::Unauthorized);
    }

    Ok(next.run(req).await)
}
