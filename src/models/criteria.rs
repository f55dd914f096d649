use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Price range applied when nothing else has been configured.
pub const DEFAULT_PRICE_RANGE: PriceRange = PriceRange {
    min: 0.0,
    max: 1000.0,
};

/// Categories offered by the category selector, as `(value, label)` pairs.
///
/// The empty value stands for "All Categories". Category matching itself is
/// an exact, case-sensitive comparison against the product's category text,
/// so values outside this list are accepted and simply match nothing.
pub const CATEGORY_OPTIONS: [(&str, &str); 5] = [
    ("", "All Categories"),
    ("electronics", "Electronics"),
    ("jewelery", "Jewelery"),
    ("men's clothing", "Men's Clothing"),
    ("women's clothing", "Women's Clothing"),
];

/// Inclusive price bounds `[min, max]`.
///
/// Serialized as a two-element sequence so configuration files can write
/// `default_price_range: [0, 1000]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        DEFAULT_PRICE_RANGE
    }
}

impl From<[f64; 2]> for PriceRange {
    fn from([min, max]: [f64; 2]) -> Self {
        Self { min, max }
    }
}

impl From<PriceRange> for [f64; 2] {
    fn from(range: PriceRange) -> Self {
        [range.min, range.max]
    }
}

/// User-selected constraints applied by the filter engine.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Exact category to keep; empty means no constraint.
    pub category: String,

    /// Inclusive price bounds.
    pub price_range: PriceRange,

    /// Minimum rating; `None` means no constraint.
    ///
    /// Always go through [`normalize_min_rating`] when setting this so that
    /// zero and NaN never show up as an active constraint.
    pub min_rating: Option<f64>,
}

impl FilterCriteria {
    pub fn with_price_range(price_range: PriceRange) -> Self {
        Self {
            category: String::new(),
            price_range,
            min_rating: None,
        }
    }
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self::with_price_range(DEFAULT_PRICE_RANGE)
    }
}

/// Collapse a raw minimum rating into an optional constraint.
///
/// Zero and NaN both mean "no minimum". Any other value, negative ones
/// included, is an active constraint and therefore excludes unrated products.
pub fn normalize_min_rating(value: f64) -> Option<f64> {
    if value == 0.0 || value.is_nan() {
        None
    } else {
        Some(value)
    }
}

/// Parse the free-form minimum rating input.
///
/// Empty or non-numeric input clears the constraint instead of failing.
pub fn parse_min_rating(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .and_then(normalize_min_rating)
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Keep the catalog order.
    #[default]
    None,
    PriceAscending,
    PriceDescending,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown sort order '{0}' (expected lowToHigh, highToLow or none)")]
pub struct ParseSortKeyError(pub String);

impl SortKey {
    /// Value used by the sort selector.
    pub fn selector_value(&self) -> &'static str {
        match self {
            SortKey::None => "",
            SortKey::PriceAscending => "lowToHigh",
            SortKey::PriceDescending => "highToLow",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::None => "Sort by",
            SortKey::PriceAscending => "Price: Low to High",
            SortKey::PriceDescending => "Price: High to Low",
        }
    }
}

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(SortKey::None),
            "lowToHigh" => Ok(SortKey::PriceAscending),
            "highToLow" => Ok(SortKey::PriceDescending),
            other => Err(ParseSortKeyError(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display label for a category value, falling back to the raw value.
pub fn category_label(category: &str) -> &str {
    CATEGORY_OPTIONS
        .iter()
        .find(|(value, _)| *value == category)
        .map(|(_, label)| *label)
        .unwrap_or(category)
}
