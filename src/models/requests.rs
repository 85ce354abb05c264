//! Request DTOs for the proxy API
//!
//! Defines the query parameters accepted by the list endpoint.

use serde::Deserialize;

use crate::error::Result;
use crate::pokemon::{parse_positive, ListQuery, SortField};

/// Query string of `GET /api/pokemons`
///
/// Parameters are kept as raw strings so malformed numbers produce the
/// proxy's own 400 body instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

impl ListParams {
    /// Converts the raw parameters into a validated [`ListQuery`].
    ///
    /// A present `search`, even empty, is kept; a blank `sort` is ignored.
    pub fn into_query(self, default_limit: u32) -> Result<ListQuery> {
        let page = parse_positive("page", self.page.as_deref(), 1)?;
        let limit = parse_positive("limit", self.limit.as_deref(), default_limit)?;

        let mut query = ListQuery::new(page, limit);
        query.search = self.search;
        query.sort = self
            .sort
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(SortField::from_param);

        Ok(query)
    }
}
