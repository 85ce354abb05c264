//! Pokemon Module
//!
//! The list-fetch-cache-filter-sort-paginate pipeline and the detail fetcher.

mod listing;
mod profile;
mod query;
mod service;

#[cfg(test)]
mod property_tests;
#[cfg(test)]
pub(crate) mod testing;

pub use listing::{extract_number, matches_search, ListingEntry};
pub use profile::{PokemonProfile, StatValue};
pub use query::{parse_positive, ListMode, ListQuery, ListResult, SortField};
pub use service::{detail_key, list_page_key, PokemonService, FULL_LIST_KEY, MAX_POKEMON_FETCH};
