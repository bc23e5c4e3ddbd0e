//! Product list derivation
//!
//! Turns the full catalog plus a [`FilterState`] into what a page shows.
//! Everything here is pure: the same inputs always give the same ordered
//! output.

use super::models::{FilterState, SortKey};
use crate::catalog::models::Product;
use serde::Serialize;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Pages shown on each side of the current page in the page-number bar
pub const PAGE_WINDOW: usize = 1;

/// Related products shown under a product detail
pub const RELATED_LIMIT: usize = 4;

/// Filters and sorts `products`.
///
/// Steps run in order: title search, category, price floor, price ceiling,
/// then a stable sort.
pub fn apply_filters<'a>(products: &'a [Product], filters: &FilterState) -> Vec<&'a Product> {
    let query = filters.search_query.to_lowercase();
    let min = filters.price_range.min;
    let max = filters.price_range.max;

    let mut filtered: Vec<&Product> = products
        .iter()
        .filter(|p| query.is_empty() || p.title.to_lowercase().contains(&query))
        .filter(|p| filters.category.is_empty() || filters.category.contains(&p.category))
        .filter(|p| min <= 0.0 || p.price >= min)
        .filter(|p| max <= 0.0 || p.price <= max)
        .collect();

    sort_products(&mut filtered, filters.sort_by);
    filtered
}

/// Stable sort by `key`; ties keep their relative order.
pub fn sort_products(products: &mut [&Product], key: SortKey) {
    match key {
        SortKey::PriceAsc => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceDesc => products.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::Title => products.sort_by(|a, b| locale_compare(&a.title, &b.title)),
        SortKey::Rating => products.sort_by(|a, b| b.rating.rate.total_cmp(&a.rating.rate)),
    }
}

/// Dictionary order in three passes: base letters ignoring accents and
/// case, then accents (unaccented first), then case (lowercase first).
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
}

/// Lowercased canonical decomposition, combining marks included
fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    folded(s).filter(|c| !is_combining_mark(*c))
}

/// Other products of the same category, in catalog order.
pub fn related_products<'a>(
    product: &Product,
    products: &'a [Product],
    limit: usize,
) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| p.id != product.id && p.category == product.category)
        .take(limit)
        .collect()
}

// =============================================================================
// Pagination
// =============================================================================

/// One page of a derived list
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,

    /// 1-based, always within `1..=max(total_pages, 1)`
    pub page: usize,

    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Entry of the page-number bar
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageLink {
    Page { number: usize },
    Ellipsis,
}

/// `ceil(total / page_size)`
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// Slices `items` into the requested page, clamping `page` into range.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let pages = total_pages(total_items, page_size);
    let page = page.clamp(1, pages.max(1));

    Page {
        items: items
            .iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .cloned()
            .collect(),
        page,
        page_size,
        total_items,
        total_pages: pages,
    }
}

/// Page-number bar for `current` out of `total_pages`.
///
/// Always shows the first and last page and [`PAGE_WINDOW`] pages around
/// the current one. A gap of one page shows that page; longer gaps collapse
/// into an ellipsis.
pub fn page_numbers(current: usize, total_pages: usize) -> Vec<PageLink> {
    if total_pages == 0 {
        return Vec::new();
    }

    let current = current.clamp(1, total_pages);
    let low = current.saturating_sub(PAGE_WINDOW).max(1);
    let high = (current + PAGE_WINDOW).min(total_pages);

    let mut shown: Vec<usize> = Vec::with_capacity(high - low + 3);
    shown.push(1);
    shown.extend(low..=high);
    shown.push(total_pages);
    shown.sort_unstable();
    shown.dedup();

    let mut links = Vec::with_capacity(shown.len() + 2);
    let mut previous: Option<usize> = None;
    for number in shown {
        if let Some(prev) = previous {
            match number - prev - 1 {
                0 => {}
                1 => links.push(PageLink::Page { number: prev + 1 }),
                _ => links.push(PageLink::Ellipsis),
            }
        }
        links.push(PageLink::Page { number });
        previous = Some(number);
    }
    links
}
