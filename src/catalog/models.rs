//! Catalog Domain Models
//!
//! Shapes served by the product API plus the view payloads built on them.

use crate::filter::derive::{Page, PageLink};
use crate::filter::models::FilterState;
use serde::{Deserialize, Serialize};

// =============================================================================
// API Models
// =============================================================================

/// A product as returned by the API. Immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Externally assigned, unique identifier
    pub id: u64,

    pub title: String,

    /// Unit price, never negative
    pub price: f64,

    #[serde(default)]
    pub description: String,

    pub category: String,

    /// Image URL
    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub rating: Rating,
}

/// Aggregate customer rating
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Rating {
    /// Average rate between 0 and 5
    pub rate: f64,

    /// Number of ratings
    pub count: u32,
}

/// State of one catalog fetch: the data, whether a request is in flight,
/// and the error message of the last failed request.
#[derive(Debug, Clone, Serialize, Default)]
pub struct Resource<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Resource<T> {
    pub(crate) fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub(crate) fn succeed(&mut self, data: T) {
        self.data = data;
        self.loading = false;
    }

    pub(crate) fn fail(&mut self, message: &str) {
        self.error = Some(message.to_string());
        self.loading = false;
    }
}

// =============================================================================
// View Models
// =============================================================================

/// Query parameters of the catalog page
#[derive(Debug, Deserialize, Default)]
pub struct ListingQuery {
    /// Search text to apply before deriving the page
    pub query: Option<String>,

    /// 1-based page number
    pub page: Option<usize>,
}

/// Everything the catalog page renders
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingView {
    pub products: Page<Product>,
    pub page_numbers: Vec<PageLink>,
    pub product_count: usize,
    pub filters: FilterState,
    pub has_active_filters: bool,
    pub categories: Vec<String>,
    pub cart_quantity: u32,
}

/// Everything the product detail page renders
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    pub product: Product,
    pub related: Vec<Product>,
    pub cart_quantity: u32,
}

/// Response of a manual catalog reload
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub products: usize,
    pub categories: usize,
}

#[cfg(test)]
pub(crate) fn sample_product(id: u64, title: &str, price: f64, category: &str) -> Product {
    Product {
        id,
        title: title.to_string(),
        price,
        description: String::new(),
        category: category.to_string(),
        image: format!("https://example.com/{id}.png"),
        rating: Rating::default(),
    }
}
