//! Listing entries and the in-memory search, sort and pagination steps.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::query::{ListResult, SortField};

// == Listing Entry ==
/// One row of the upstream listing, annotated with its Pokedex number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    pub name: String,
    pub url: String,
    /// Number recovered from `url`; 0 when the url carries none
    #[serde(default)]
    pub number: u64,
}

impl ListingEntry {
    /// Builds an entry, deriving `number` from the url.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            name: name.into(),
            number: extract_number(&url),
            url,
        }
    }

    /// Fills in `number` from the url unless the entry already carries one.
    pub fn annotate(mut self) -> Self {
        if self.number == 0 {
            self.number = extract_number(&self.url);
        }
        self
    }
}

// == Upstream Page ==
/// The slice of the upstream list payload the proxy reads.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamPage {
    pub count: u64,
    #[serde(default)]
    pub results: Vec<ListingEntry>,
}

/// Decodes an array of upstream `{name, url}` objects into annotated entries.
pub fn entries_from_value(value: Value) -> serde_json::Result<Vec<ListingEntry>> {
    let entries: Vec<ListingEntry> = serde_json::from_value(value)?;
    Ok(entries.into_iter().map(ListingEntry::annotate).collect())
}

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"/pokemon/(\d+)/").expect("number pattern is a valid regex"))
}

/// Extracts the Pokedex number from an upstream resource url such as
/// `https://pokeapi.co/api/v2/pokemon/25/`. Returns 0 when there is none.
pub fn extract_number(url: &str) -> u64 {
    number_pattern()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

// == Filter ==
/// Checks whether an entry matches a search term.
///
/// A purely numeric term must equal the entry number exactly; anything else
/// is a case-insensitive substring match on the name.
pub fn matches_search(entry: &ListingEntry, search: &str) -> bool {
    let needle = search.trim().to_lowercase();

    if !needle.is_empty() && needle.chars().all(|c| c.is_ascii_digit()) {
        entry.number.to_string() == needle
    } else {
        entry.name.to_lowercase().contains(&needle)
    }
}

/// Keeps the entries matching `search`. A blank term keeps everything.
pub fn filter_entries(entries: &mut Vec<ListingEntry>, search: &str) {
    if search.trim().is_empty() {
        return;
    }
    entries.retain(|entry| matches_search(entry, search));
}

// == Sort ==
/// Stable ascending sort by the chosen field.
pub fn sort_entries(entries: &mut [ListingEntry], field: SortField) {
    match field {
        SortField::Name => entries.sort_by(|a, b| a.name.cmp(&b.name)),
        SortField::Number => entries.sort_by_key(|entry| entry.number),
    }
}

// == Paginate ==
/// Cuts one page out of the already filtered and sorted entries.
///
/// `page` is echoed back unchanged; a page past the end yields no entries.
pub fn paginate(entries: Vec<ListingEntry>, page: u32, limit: u32) -> ListResult {
    let total_count = entries.len() as u64;
    let total_pages = total_count.div_ceil(u64::from(limit.max(1)));
    let offset = u64::from(page.saturating_sub(1)) * u64::from(limit);

    let entries = entries
        .into_iter()
        .skip(usize::try_from(offset).unwrap_or(usize::MAX))
        .take(limit as usize)
        .collect();

    ListResult {
        total_count,
        total_pages: Some(total_pages),
        page,
        entries,
    }
}
