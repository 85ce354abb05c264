//! API Module
//!
//! HTTP handlers and routing for the proxy.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /api/pokemons` - Paginated, searchable, sortable listing
//! - `GET /api/pokemons/:id` - Upstream detail record by id or name
//! - `GET /api/pokemons/:id/profile` - Normalized detail view
//! - `GET /api/cache/stats` - Cache statistics
//! - `DELETE /api/cache` - Clear the cache
//!
//! Everything under `/api` requires a bearer token.

pub mod auth;
pub mod handlers;
pub mod routes;

pub use auth::{Authenticator, BearerTokenAuth};
pub use handlers::*;
pub use routes::create_router;
