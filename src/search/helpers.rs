//! Search suggestion helpers

/// Suggestions shown under the search box
pub const MAX_SUGGESTIONS: usize = 5;

/// Titles containing `query` (case-insensitive), in catalog order, at most
/// `max` of them. A blank query suggests nothing.
pub fn search_suggestions(query: &str, titles: &[String], max: usize) -> Vec<String> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let query = query.to_lowercase();
    titles
        .iter()
        .filter(|title| title.to_lowercase().contains(&query))
        .take(max)
        .cloned()
        .collect()
}
