//! List query, mode selection and result types.

use serde::{Deserialize, Serialize};

use super::listing::ListingEntry;
use crate::error::{ProxyError, Result};

// == Sort Field ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    #[default]
    Number,
}

impl SortField {
    /// Parses a `sort` parameter. Anything other than `name` sorts by number.
    pub fn from_param(raw: &str) -> Self {
        match raw {
            "name" => SortField::Name,
            _ => SortField::Number,
        }
    }
}

// == List Mode ==
/// How a list request is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode<'a> {
    /// One upstream page, fetched and cached per page/limit pair
    Basic,
    /// Filter, sort and paginate the cached full listing
    Aggregate {
        search: Option<&'a str>,
        sort: SortField,
    },
}

// == List Query ==
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number
    pub page: u32,
    pub limit: u32,
    /// Search term; `Some("")` still selects aggregate mode
    pub search: Option<String>,
    pub sort: Option<SortField>,
}

impl ListQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            search: None,
            sort: None,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_sort(mut self, sort: SortField) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Rejects a page or limit below 1.
    pub fn validate(&self) -> Result<()> {
        if self.page < 1 {
            return Err(ProxyError::InvalidRequest(
                "page must be a positive integer".to_string(),
            ));
        }
        if self.limit < 1 {
            return Err(ProxyError::InvalidRequest(
                "limit must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    /// Aggregate mode whenever a search term (even empty) or a sort is given.
    pub fn mode(&self) -> ListMode<'_> {
        if self.search.is_some() || self.sort.is_some() {
            ListMode::Aggregate {
                search: self.search.as_deref(),
                sort: self.sort.unwrap_or_default(),
            }
        } else {
            ListMode::Basic
        }
    }
}

/// Parses a positive integer query parameter, falling back to `default`
/// when it is absent.
pub fn parse_positive(name: &str, raw: Option<&str>, default: u32) -> Result<u32> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    match raw.trim().parse::<u32>() {
        Ok(value) if value >= 1 => Ok(value),
        _ => Err(ProxyError::InvalidRequest(format!(
            "{} must be a positive integer",
            name
        ))),
    }
}

// == List Result ==
/// One page of listing entries plus totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResult {
    #[serde(rename = "total")]
    pub total_count: u64,
    /// Not computed in basic mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,
    pub page: u32,
    #[serde(rename = "results")]
    pub entries: Vec<ListingEntry>,
}
