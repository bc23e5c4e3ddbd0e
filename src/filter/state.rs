//! Filter State Management

use super::models::{FilterPatch, FilterState, PriceBound, PriceRange, SortKey};
use tracing::debug;

/// Parses a price input field.
///
/// Empty input means unbounded (`0`). Anything that isn't a finite,
/// non-negative number yields `None` and must be ignored by the caller.
pub fn parse_price_input(input: &str) -> Option<f64> {
    let input = input.trim();
    if input.is_empty() {
        return Some(0.0);
    }
    input.parse::<f64>().ok().filter(|v| is_valid_price(*v))
}

fn is_valid_price(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Holder of the active [`FilterState`]. Setters never fail; invalid
/// prices are dropped.
#[derive(Debug, Clone)]
pub struct FilterStore {
    state: FilterState,
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterStore {
    /// Fresh filters: nothing selected, cheapest first.
    pub fn new() -> Self {
        Self {
            state: FilterState {
                sort_by: SortKey::PriceAsc,
                ..FilterState::default()
            },
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Replaces the selected categories, dropping repeats.
    pub fn set_category(&mut self, categories: Vec<String>) {
        let mut unique: Vec<String> = Vec::with_capacity(categories.len());
        for category in categories {
            if !unique.contains(&category) {
                unique.push(category);
            }
        }
        self.state.category = unique;
    }

    /// Checkbox semantics: checking adds, unchecking removes.
    pub fn toggle_category(&mut self, category: &str, checked: bool) {
        let selected = self.state.category.iter().any(|c| c == category);
        match (checked, selected) {
            (true, false) => self.state.category.push(category.to_string()),
            (false, true) => self.state.category.retain(|c| c != category),
            _ => {}
        }
    }

    /// Sets both bounds; each invalid bound is ignored on its own.
    pub fn set_price_range(&mut self, min: f64, max: f64) {
        self.set_min_price(min);
        self.set_max_price(max);
    }

    pub fn set_min_price(&mut self, min: f64) {
        if is_valid_price(min) {
            self.state.price_range.min = min;
        } else {
            debug!("Ignoring invalid minimum price {min}");
        }
    }

    pub fn set_max_price(&mut self, max: f64) {
        if is_valid_price(max) {
            self.state.price_range.max = max;
        } else {
            debug!("Ignoring invalid maximum price {max}");
        }
    }

    /// Applies raw text from a price input field.
    pub fn set_price_input(&mut self, bound: PriceBound, input: &str) {
        let Some(value) = parse_price_input(input) else {
            debug!("Ignoring non-numeric price input {input:?}");
            return;
        };
        match bound {
            PriceBound::Min => self.state.price_range.min = value,
            PriceBound::Max => self.state.price_range.max = value,
        }
    }

    pub fn set_sort_by(&mut self, sort_by: SortKey) {
        self.state.sort_by = sort_by;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.state.search_query = query.into();
    }

    /// Back to no categories, no price bounds, title order and no query.
    pub fn reset(&mut self) {
        self.state = FilterState::default();
    }

    pub fn apply(&mut self, patch: FilterPatch) {
        if let Some(category) = patch.category {
            self.set_category(category);
        }
        if let Some(min) = patch.min_price {
            self.set_price_input(PriceBound::Min, &min);
        }
        if let Some(max) = patch.max_price {
            self.set_price_input(PriceBound::Max, &max);
        }
        if let Some(sort_by) = patch.sort_by {
            self.set_sort_by(sort_by);
        }
        if let Some(query) = patch.search_query {
            self.set_search_query(query);
        }
    }

    pub fn has_active_filters(&self) -> bool {
        let PriceRange { min, max } = self.state.price_range;
        !self.state.category.is_empty()
            || min > 0.0
            || max > 0.0
            || !self.state.search_query.is_empty()
    }
}
