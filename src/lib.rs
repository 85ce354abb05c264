//! Pokedex Proxy - authenticated caching proxy for the PokeAPI
//!
//! Serves paginated, searchable and sortable Pokemon listings and per-item
//! detail records, caching upstream payloads in memory with a fixed TTL.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod pokemon;
pub mod upstream;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{ProxyError, Result};
pub use pokemon::{ListQuery, ListResult, PokemonService};
