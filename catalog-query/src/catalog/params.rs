//! Listing parameters for the product catalog

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pagination::PageLimits;

/// Sort order for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortMode {
    #[default]
    NameAsc,
    PriceAsc,
    PriceDesc,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::NameAsc => "name-asc",
            SortMode::PriceAsc => "price-asc",
            SortMode::PriceDesc => "price-desc",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = Error;

    /// Accepts `name-asc`, `price-asc`, `price-desc` and the camelCase
    /// spellings `name`, `priceAsc`, `priceDesc`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" | "name" | "name-asc" | "nameAsc" => Ok(SortMode::NameAsc),
            "price-asc" | "priceAsc" => Ok(SortMode::PriceAsc),
            "price-desc" | "priceDesc" => Ok(SortMode::PriceDesc),
            other => Err(Error::InvalidSpecification(format!(
                "unknown sort mode `{}`",
                other
            ))),
        }
    }
}

/// Loosely-typed listing parameters as they arrive from a caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductSpecParams {
    /// Page to return (0-based)
    pub page_index: usize,
    /// Requested page size; resolved against [`PageLimits`]
    pub page_size: Option<usize>,
    /// Brands to include; empty means all brands
    pub brands: Vec<String>,
    /// Product types to include; empty means all types
    pub types: Vec<String>,
    /// Sort mode, see [`SortMode`]
    pub sort: Option<String>,
    /// Case-insensitive search on the product name
    pub search: Option<String>,
}

impl ProductSpecParams {
    /// Set the brand filter from a comma-separated list.
    pub fn brands(mut self, csv: &str) -> Self {
        self.brands = split_list(csv);
        self
    }

    /// Set the type filter from a comma-separated list.
    pub fn types(mut self, csv: &str) -> Self {
        self.types = split_list(csv);
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn page(mut self, page_index: usize, page_size: usize) -> Self {
        self.page_index = page_index;
        self.page_size = Some(page_size);
        self
    }

    /// The lowercased search term, if one was given.
    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }

    /// The requested sort mode; unknown modes are rejected.
    pub fn sort_mode(&self) -> Result<SortMode> {
        match self.sort.as_deref() {
            Some(sort) => sort.parse(),
            None => Ok(SortMode::default()),
        }
    }

    /// The effective page size under the given limits.
    pub fn page_size(&self, limits: &PageLimits) -> usize {
        limits.page_size(self.page_size)
    }
}

fn split_list(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
