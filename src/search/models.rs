//! Search Box Models

use serde::{Deserialize, Serialize};

/// Keystroke in the search box
#[derive(Debug, Deserialize)]
pub struct SearchInput {
    pub query: String,
}

/// Explicit submit; without a query the box's current text is used
#[derive(Debug, Deserialize, Default)]
pub struct SubmitInput {
    pub query: Option<String>,
}

/// Click on a suggestion
#[derive(Debug, Deserialize)]
pub struct SelectInput {
    pub suggestion: String,
}

/// Search box as the header renders it
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchView {
    pub query: String,
    pub suggestions: Vec<String>,
    pub focused: bool,
    /// A debounced search is still waiting to apply
    pub pending: bool,
}
