//! Pokemon Service
//!
//! Read-through cache in front of the upstream list and detail endpoints.
//! Plain pagination is served one upstream page at a time; search and sort
//! run in memory over a single cached snapshot of the full listing.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use super::listing::{
    entries_from_value, filter_entries, paginate, sort_entries, ListingEntry, UpstreamPage,
};
use super::profile::PokemonProfile;
use super::query::{ListMode, ListQuery, ListResult, SortField};
use crate::cache::{CacheStats, SharedCache};
use crate::error::{ProxyError, Result};
use crate::upstream::Upstream;

/// Upper bound on the page window used to download the full listing.
pub const MAX_POKEMON_FETCH: u32 = 10_000;

/// Cache key of the full listing snapshot.
pub const FULL_LIST_KEY: &str = "list:full";

const LIST_PATH: &str = "pokemon";

/// Cache key of one basic-mode page.
pub fn list_page_key(page: u32, limit: u32) -> String {
    format!("list:{}:{}", page, limit)
}

/// Cache key of one detail record.
pub fn detail_key(id_or_name: &str) -> String {
    format!("detail:{}", id_or_name)
}

// == Pokemon Service ==
/// List and detail operations over an injected upstream and cache.
#[derive(Clone)]
pub struct PokemonService {
    upstream: Arc<dyn Upstream>,
    cache: SharedCache,
    ttl: Duration,
}

impl PokemonService {
    // == Constructor ==
    /// Creates a service; every cache write uses the fixed `ttl`.
    pub fn new(upstream: Arc<dyn Upstream>, cache: SharedCache, ttl: Duration) -> Self {
        Self {
            upstream,
            cache,
            ttl,
        }
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    // == Fetch List ==
    /// Returns one page of the listing for `query`.
    ///
    /// Fails with `InvalidRequest` before touching upstream when page or
    /// limit is below 1.
    pub async fn fetch_list(&self, query: &ListQuery) -> Result<ListResult> {
        query.validate()?;

        match query.mode() {
            ListMode::Basic => self.fetch_page(query.page, query.limit).await,
            ListMode::Aggregate { search, sort } => {
                self.fetch_aggregate(query.page, query.limit, search, sort)
                    .await
            }
        }
    }

    // == Fetch Detail ==
    /// Returns the upstream detail record for an id or name, verbatim.
    ///
    /// Failures are never cached, so a later call retries upstream.
    pub async fn fetch_detail(&self, id_or_name: &str) -> Result<Value> {
        let id = validate_identifier(id_or_name)?;
        let key = detail_key(id);

        if let Some(record) = self.cached(&key).await {
            return Ok(record);
        }

        let record = self
            .fetch_json(&format!("{}/{}", LIST_PATH, id), &[])
            .await?;
        self.store(key, record.clone()).await;

        Ok(record)
    }

    // == Fetch Profile ==
    /// Returns the normalized profile built from the detail record.
    pub async fn fetch_profile(&self, id_or_name: &str) -> Result<PokemonProfile> {
        let record = self.fetch_detail(id_or_name).await?;
        Ok(PokemonProfile::from_record(&record)?)
    }

    // == Cache Administration ==
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    /// Drops every cached payload. Returns how many entries were removed.
    pub async fn clear_cache(&self) -> usize {
        self.cache.write().await.clear()
    }

    async fn fetch_page(&self, page: u32, limit: u32) -> Result<ListResult> {
        let key = list_page_key(page, limit);

        let upstream: UpstreamPage = match self.cached(&key).await {
            Some(payload) => serde_json::from_value(payload)?,
            None => {
                let offset = u64::from(page - 1) * u64::from(limit);
                let payload = self
                    .fetch_json(
                        LIST_PATH,
                        &[("offset", offset.to_string()), ("limit", limit.to_string())],
                    )
                    .await?;
                // Decode before caching so a malformed page is never stored
                let upstream = serde_json::from_value(payload.clone())?;
                self.store(key, payload).await;
                upstream
            }
        };

        Ok(ListResult {
            total_count: upstream.count,
            total_pages: None,
            page,
            entries: upstream
                .results
                .into_iter()
                .map(ListingEntry::annotate)
                .collect(),
        })
    }

    async fn fetch_aggregate(
        &self,
        page: u32,
        limit: u32,
        search: Option<&str>,
        sort: SortField,
    ) -> Result<ListResult> {
        let mut entries = self.full_listing().await?;

        if let Some(term) = search {
            filter_entries(&mut entries, term);
        }
        sort_entries(&mut entries, sort);

        Ok(paginate(entries, page, limit))
    }

    /// Returns the full listing, downloading it once per TTL window.
    async fn full_listing(&self) -> Result<Vec<ListingEntry>> {
        if let Some(results) = self.cached(FULL_LIST_KEY).await {
            return Ok(entries_from_value(results)?);
        }

        let payload = self
            .fetch_json(
                LIST_PATH,
                &[
                    ("offset", "0".to_string()),
                    ("limit", MAX_POKEMON_FETCH.to_string()),
                ],
            )
            .await?;

        let results = payload.get("results").cloned().ok_or_else(|| {
            ProxyError::Service("Unexpected error: listing has no results".to_string())
        })?;
        let entries = entries_from_value(results.clone())?;
        debug!(count = entries.len(), "full listing downloaded");

        self.store(FULL_LIST_KEY, results).await;
        Ok(entries)
    }

    async fn cached(&self, key: &str) -> Option<Value> {
        let hit = self.cache.write().await.get(key);
        debug!(key, hit = hit.is_some(), "cache lookup");
        hit
    }

    async fn store(&self, key: impl Into<String>, payload: Value) {
        self.cache.write().await.put(key, payload, self.ttl);
    }

    /// GETs `path` and decodes a 2xx body as JSON.
    ///
    /// 404 becomes `NotFound`; any other status, transport failure or
    /// undecodable body becomes `Service`.
    async fn fetch_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let response = self.upstream.get(path, query).await.map_err(|err| {
            warn!(path, error = %err, "upstream request failed");
            ProxyError::from(err)
        })?;

        if response.is_success() {
            return Ok(serde_json::from_str(&response.body)?);
        }

        warn!(path, status = response.status, "upstream returned error status");
        match response.status {
            404 => Err(ProxyError::pokemon_not_found()),
            status => Err(ProxyError::upstream_status(status)),
        }
    }
}

/// Accepts ids and names made of ASCII letters, digits and hyphens.
fn validate_identifier(raw: &str) -> Result<&str> {
    let id = raw.trim();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ProxyError::InvalidRequest(format!(
            "invalid pokemon identifier: {:?}",
            raw
        )));
    }
    Ok(id)
}
