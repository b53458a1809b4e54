//! Client-side ordering of agency lists.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::agency::AgencyRecord;
use crate::CoreError;

/// The three orderings offered by the sort selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Cheapest first, by [`parse_price`].
    #[default]
    Pricing,
    /// Most reviewed first. Review counts are compared as totally ordered
    /// floats.
    Review,
    /// Highest id first.
    Latest,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [SortMode::Pricing, SortMode::Review, SortMode::Latest];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Pricing => "pricing",
            SortMode::Review => "review",
            SortMode::Latest => "latest",
        }
    }

    /// Label shown in the sort selector.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SortMode::Pricing => "Pricing",
            SortMode::Review => "Review",
            SortMode::Latest => "Latest",
        }
    }

    /// The next mode in selector order, wrapping around.
    #[must_use]
    pub fn next(self) -> SortMode {
        match self {
            SortMode::Pricing => SortMode::Review,
            SortMode::Review => SortMode::Latest,
            SortMode::Latest => SortMode::Pricing,
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pricing" => Ok(SortMode::Pricing),
            "review" => Ok(SortMode::Review),
            "latest" => Ok(SortMode::Latest),
            _ => Err(CoreError::UnknownSortMode(s.to_string())),
        }
    }
}

/// Extracts the numeric value embedded in a free-form price string.
///
/// All ASCII digits are concatenated and read as one unsigned integer, so
/// `"$1,200/mo"` is `1200` and `"$9.99"` is `999`. Text without digits yields
/// `0`. A digit run that does not fit in `u64` saturates at `u64::MAX`.
#[must_use]
pub fn parse_price(pricing: &str) -> u64 {
    pricing
        .bytes()
        .filter(u8::is_ascii_digit)
        .try_fold(0u64, |acc, b| {
            acc.checked_mul(10)?.checked_add(u64::from(b - b'0'))
        })
        .unwrap_or(u64::MAX)
}

/// Compares two records under `mode`.
#[must_use]
pub fn compare_by(mode: SortMode, a: &AgencyRecord, b: &AgencyRecord) -> Ordering {
    match mode {
        SortMode::Pricing => parse_price(&a.pricing).cmp(&parse_price(&b.pricing)),
        SortMode::Review => b.reviews.total_cmp(&a.reviews),
        SortMode::Latest => b.id.cmp(&a.id),
    }
}

/// Sorts `items` in place under `mode`. The sort is stable: ties keep their
/// existing relative order.
pub fn sort_records<T: Borrow<AgencyRecord>>(items: &mut [T], mode: SortMode) {
    items.sort_by(|a, b| compare_by(mode, a.borrow(), b.borrow()));
}

#[cfg(test)]
#[path = "sorting_test.rs"]
mod tests;
