//! API Routes
//!
//! Configures the Axum router with all proxy endpoints.

use axum::{
    middleware,
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::auth::require_auth;
use super::handlers::{
    clear_cache_handler, detail_handler, health_handler, list_handler, profile_handler,
    stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - Auth: bearer token gate on every `/api` route
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/api/pokemons", get(list_handler))
        .route("/api/pokemons/:id", get(detail_handler))
        .route("/api/pokemons/:id/profile", get(profile_handler))
        .route("/api/cache/stats", get(stats_handler))
        .route("/api/cache", delete(clear_cache_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health_handler))
        .merge(api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
