//! Filter Domain Models

use serde::{Deserialize, Serialize};

/// Order of the displayed products
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SortKey {
    #[serde(rename = "price-asc")]
    PriceAsc,

    #[serde(rename = "price-desc")]
    PriceDesc,

    /// Locale-aware title order
    #[default]
    #[serde(rename = "title")]
    Title,

    /// Highest rated first
    #[serde(rename = "rating")]
    Rating,
}

/// Price bounds; `0` on either side means unbounded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Which side of the price range an input edits
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PriceBound {
    Min,
    Max,
}

/// Active catalog filters. Transient, never persisted.
///
/// `Default` is the reset state; a fresh [`super::state::FilterStore`]
/// starts out sorted by ascending price instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Selected categories, without duplicates
    pub category: Vec<String>,

    pub price_range: PriceRange,

    pub sort_by: SortKey,

    pub search_query: String,
}

/// Partial filter update; absent fields are left alone.
///
/// Prices arrive as raw input text and go through the same parsing as the
/// price inputs.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FilterPatch {
    pub category: Option<Vec<String>>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub sort_by: Option<SortKey>,
    pub search_query: Option<String>,
}

/// Input for the category checkbox
#[derive(Debug, Deserialize)]
pub struct CategoryToggleInput {
    pub category: String,
    pub checked: bool,
}

/// Filters plus the derived "anything active?" flag
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterView {
    pub filters: FilterState,
    pub has_active_filters: bool,
}
