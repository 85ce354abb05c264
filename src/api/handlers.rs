//! API Handlers
//!
//! HTTP request handlers for each proxy endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;

use super::auth::{Authenticator, BearerTokenAuth};
use crate::cache::{self, CacheStore};
use crate::config::Config;
use crate::error::Result;
use crate::models::{ClearResponse, HealthResponse, ListParams, StatsResponse};
use crate::pokemon::{ListResult, PokemonProfile, PokemonService};
use crate::upstream::{PokeApiClient, UpstreamError};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: PokemonService,
    pub auth: Arc<dyn Authenticator>,
    /// Page size used when `limit` is omitted
    pub default_page_limit: u32,
}

impl AppState {
    /// Creates a new AppState around an already wired service.
    pub fn new(service: PokemonService, auth: Arc<dyn Authenticator>) -> Self {
        Self {
            service,
            auth,
            default_page_limit: Config::default().default_page_limit,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the PokeAPI client, an empty cache and the bearer token gate.
    pub fn from_config(config: &Config) -> std::result::Result<Self, UpstreamError> {
        let upstream = Arc::new(PokeApiClient::from_config(config)?);
        let service = PokemonService::new(
            upstream,
            cache::shared(CacheStore::new()),
            config.cache_ttl(),
        );
        let auth = Arc::new(BearerTokenAuth::new(config.api_tokens.iter().cloned()));

        Ok(Self {
            service,
            auth,
            default_page_limit: config.default_page_limit,
        })
    }
}

/// Handler for GET /api/pokemons
///
/// Upstream absence on the list endpoint is reported as unavailable, not 404.
pub async fn list_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResult>> {
    let query = params.into_query(state.default_page_limit)?;

    let result = state
        .service
        .fetch_list(&query)
        .await
        .map_err(|err| err.into_service())?;

    Ok(Json(result))
}

/// Handler for GET /api/pokemons/:id
pub async fn detail_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let record = state.service.fetch_detail(&id).await?;
    Ok(Json(record))
}

/// Handler for GET /api/pokemons/:id/profile
pub async fn profile_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PokemonProfile>> {
    let profile = state.service.fetch_profile(&id).await?;
    Ok(Json(profile))
}

/// Handler for GET /api/cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.service.cache_stats().await.into())
}

/// Handler for DELETE /api/cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.service.clear_cache().await;
    tracing::info!(cleared, "cache cleared");
    Json(ClearResponse::new(cleared))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
