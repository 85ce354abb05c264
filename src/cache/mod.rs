//! Cache Module
//!
//! In-memory response cache with fixed TTL expiration. Entries hold upstream
//! JSON payloads keyed by request shape; expired entries read as misses.

mod entry;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;

/// Cache store shared between concurrent requests.
pub type SharedCache = Arc<RwLock<CacheStore>>;

/// Wraps a store for sharing across handlers and the pokemon service.
pub fn shared(store: CacheStore) -> SharedCache {
    Arc::new(RwLock::new(store))
}
