//! Scripted upstream used by the pokemon unit and property tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use super::listing::ListingEntry;
use crate::upstream::{RawResponse, Upstream, UpstreamError};

type Reply = Result<RawResponse, UpstreamError>;

/// Upstream fake keyed by `path?query`, counting every call it receives.
/// Unscripted requests answer 404.
#[derive(Default)]
pub struct ScriptedUpstream {
    replies: Mutex<HashMap<String, Reply>>,
    calls: Mutex<HashMap<String, usize>>,
}

impl ScriptedUpstream {
    pub const FULL_LISTING: &'static str = "pokemon?offset=0&limit=10000";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_full_listing(entries: Vec<ListingEntry>) -> Self {
        let results: Vec<_> = entries
            .iter()
            .map(|e| json!({"name": e.name, "url": e.url}))
            .collect();
        let body = json!({
            "count": results.len(),
            "next": null,
            "previous": null,
            "results": results,
        });
        Self::new().ok(Self::FULL_LISTING, body.to_string())
    }

    pub fn reply(self, key: &str, reply: Reply) -> Self {
        self.set_reply(key, reply);
        self
    }

    pub fn ok(self, key: &str, body: impl Into<String>) -> Self {
        self.reply(key, Ok(RawResponse::new(200, body)))
    }

    pub fn set_reply(&self, key: &str, reply: Reply) {
        self.replies.lock().unwrap().insert(key.to_string(), reply);
    }

    pub fn calls_to(&self, key: &str) -> usize {
        self.calls.lock().unwrap().get(key).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl Upstream for ScriptedUpstream {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Reply {
        let mut key = path.trim_start_matches('/').to_string();
        if !query.is_empty() {
            let pairs: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            key = format!("{}?{}", key, pairs.join("&"));
        }

        *self.calls.lock().unwrap().entry(key.clone()).or_insert(0) += 1;

        self.replies
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Ok(RawResponse::new(404, "unscripted")))
    }
}

fn entry(name: &str, number: u64) -> ListingEntry {
    ListingEntry::new(name, format!("https://pokeapi.co/api/v2/pokemon/{}/", number))
}

/// bulbasaur 1, charmander 4, charmeleon 5, pikachu 25, ivysaur 2
pub fn full_listing_fixture() -> Vec<ListingEntry> {
    vec![
        entry("bulbasaur", 1),
        entry("charmander", 4),
        entry("charmeleon", 5),
        entry("pikachu", 25),
        entry("ivysaur", 2),
    ]
}
