//! Property-Based Tests for the list pipeline
//!
//! Drives the service against a scripted upstream and checks the filtering,
//! sorting, pagination and caching invariants on every result.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;

use super::testing::ScriptedUpstream;
use super::{ListQuery, ListingEntry, PokemonService, SortField};
use crate::cache::{self, CacheStore};

const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates a listing with unique names and unique numbers
fn listing_strategy() -> impl Strategy<Value = Vec<ListingEntry>> {
    prop::collection::vec(("[a-z]{1,10}", 1u64..2000), 0..60).prop_map(|raw| {
        let mut seen_names = HashSet::new();
        let mut seen_numbers = HashSet::new();
        raw.into_iter()
            .filter(|(name, number)| seen_names.insert(name.clone()) && seen_numbers.insert(*number))
            .map(|(name, number)| {
                ListingEntry::new(name, format!("https://pokeapi.co/api/v2/pokemon/{}/", number))
            })
            .collect()
    })
}

fn search_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "[a-zA-Z]{1,3}".prop_map(Some),
        (1u64..2000).prop_map(|n| Some(n.to_string())),
    ]
}

fn sort_strategy() -> impl Strategy<Value = Option<SortField>> {
    prop_oneof![
        Just(None),
        Just(Some(SortField::Name)),
        Just(Some(SortField::Number)),
    ]
}

fn build_query(page: u32, limit: u32, search: Option<String>, sort: Option<SortField>) -> ListQuery {
    let mut query = ListQuery::new(page, limit);
    query.search = search;
    // Keep every generated query in aggregate mode
    query.sort = sort.or(Some(SortField::Number));
    query
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Every entry returned by a search satisfies the search, and the page
    // respects the sort order and the page-size bounds.
    #[test]
    fn prop_filter_sort_paginate_invariants(
        listing in listing_strategy(),
        search in search_strategy(),
        sort in sort_strategy(),
        page in 1u32..6,
        limit in 1u32..15,
    ) {
        let upstream = Arc::new(ScriptedUpstream::with_full_listing(listing));
        let service = PokemonService::new(upstream, cache::shared(CacheStore::new()), TEST_TTL);
        let query = build_query(page, limit, search.clone(), sort);

        let result = tokio_test::block_on(service.fetch_list(&query)).unwrap();

        if let Some(term) = search.filter(|s| !s.is_empty()) {
            let needle = term.to_lowercase();
            for entry in &result.entries {
                if needle.chars().all(|c| c.is_ascii_digit()) {
                    prop_assert_eq!(entry.number.to_string(), needle.clone());
                } else {
                    prop_assert!(entry.name.to_lowercase().contains(&needle));
                }
            }
        }

        for pair in result.entries.windows(2) {
            match query.sort {
                Some(SortField::Name) => prop_assert!(pair[0].name <= pair[1].name),
                _ => prop_assert!(pair[0].number <= pair[1].number),
            }
        }

        let total_pages = result.total_pages.unwrap();
        prop_assert!(result.entries.len() <= limit as usize);
        prop_assert_eq!(total_pages, result.total_count.div_ceil(u64::from(limit)));
        if u64::from(page) < total_pages {
            prop_assert_eq!(result.entries.len(), limit as usize);
        }
        prop_assert_eq!(result.page, page);
    }

    // Any number of aggregate queries in one TTL window downloads the full
    // listing once, and repeating a query returns the same result.
    #[test]
    fn prop_full_listing_fetched_once(
        listing in listing_strategy(),
        queries in prop::collection::vec(
            (1u32..4, 1u32..10, search_strategy(), sort_strategy()),
            1..10
        ),
    ) {
        let upstream = Arc::new(ScriptedUpstream::with_full_listing(listing));
        let service = PokemonService::new(upstream.clone(), cache::shared(CacheStore::new()), TEST_TTL);

        for (page, limit, search, sort) in queries {
            let query = build_query(page, limit, search, sort);
            let first = tokio_test::block_on(service.fetch_list(&query)).unwrap();
            let second = tokio_test::block_on(service.fetch_list(&query)).unwrap();
            prop_assert_eq!(first, second);
        }

        prop_assert_eq!(upstream.calls_to(ScriptedUpstream::FULL_LISTING), 1);
    }
}
