//! Search Box State
//!
//! Typing schedules two debounced actions: applying the query to the
//! filters and recomputing suggestions. Submitting or picking a suggestion
//! cancels both and applies the query at once.

use super::debounce::Debouncer;
use super::helpers::search_suggestions;
use super::models::SearchView;
use crate::filter::state::FilterStore;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub struct SearchBox {
    query: String,
    suggestions: Arc<Mutex<Vec<String>>>,
    focused: bool,
    search: Debouncer,
    suggest: Debouncer,
    max_suggestions: usize,
    filters: Arc<Mutex<FilterStore>>,
}

impl SearchBox {
    pub fn new(filters: Arc<Mutex<FilterStore>>, delay: Duration, max_suggestions: usize) -> Self {
        let query = filters.lock().state().search_query.clone();
        Self {
            query,
            suggestions: Arc::new(Mutex::new(Vec::new())),
            focused: false,
            search: Debouncer::new(delay),
            suggest: Debouncer::new(delay),
            max_suggestions,
            filters,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Suggestions are only visible while the box has focus.
    pub fn suggestions(&self) -> Vec<String> {
        if self.focused {
            self.suggestions.lock().clone()
        } else {
            Vec::new()
        }
    }

    pub fn is_pending(&self) -> bool {
        self.search.is_pending()
    }

    pub fn view(&self) -> SearchView {
        SearchView {
            query: self.query.clone(),
            suggestions: self.suggestions(),
            focused: self.focused,
            pending: self.is_pending(),
        }
    }

    /// A keystroke. `titles` is the catalog to suggest from.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn input(&mut self, text: impl Into<String>, titles: Vec<String>) {
        self.query = text.into();
        self.focused = true;

        let query = self.query.clone();
        let filters = Arc::clone(&self.filters);
        self.search.schedule(move || {
            debug!("Applying debounced search {query:?}");
            filters.lock().set_search_query(query);
        });

        let query = self.query.clone();
        let suggestions = Arc::clone(&self.suggestions);
        let max = self.max_suggestions;
        self.suggest.schedule(move || {
            *suggestions.lock() = search_suggestions(&query, &titles, max);
        });
    }

    /// Applies the current text now, superseding pending debounced work.
    pub fn submit(&mut self) {
        self.search.cancel();
        self.suggest.cancel();
        self.suggestions.lock().clear();
        self.focused = false;

        debug!("Search submitted {:?}", self.query);
        self.filters.lock().set_search_query(self.query.clone());
    }

    pub fn select_suggestion(&mut self, suggestion: impl Into<String>) {
        self.query = suggestion.into();
        self.submit();
    }

    /// Escape: hide suggestions without searching.
    pub fn dismiss(&mut self) {
        self.suggestions.lock().clear();
        self.focused = false;
    }

    /// Follows a query set from outside the box, e.g. a `?query=` link.
    pub fn sync_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    fn titles() -> Vec<String> {
        vec![
            "Mens Cotton Jacket".to_string(),
            "Rain Jacket Women Windbreaker".to_string(),
            "WD 2TB Elements Portable Hard Drive".to_string(),
        ]
    }

    fn search_box() -> (SearchBox, Arc<Mutex<FilterStore>>) {
        let filters = Arc::new(Mutex::new(FilterStore::new()));
        (SearchBox::new(Arc::clone(&filters), DELAY, 5), filters)
    }

    fn applied(filters: &Arc<Mutex<FilterStore>>) -> String {
        filters.lock().state().search_query.clone()
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_applies_after_quiet_period() {
        let (mut search, filters) = search_box();

        search.input("jack", titles());
        assert_eq!(search.query(), "jack");
        assert_eq!(applied(&filters), "");
        assert!(search.suggestions().is_empty());
        assert!(search.is_pending());

        tokio::time::sleep(DELAY + Duration::from_millis(10)).await;

        assert_eq!(applied(&filters), "jack");
        assert_eq!(
            search.suggestions(),
            vec!["Mens Cotton Jacket", "Rain Jacket Women Windbreaker"]
        );
        assert!(!search.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_supersedes_pending_search() {
        let (mut search, filters) = search_box();

        search.input("dri", titles());
        tokio::time::sleep(Duration::from_millis(100)).await;
        search.input("drive", titles());
        search.submit();

        assert_eq!(applied(&filters), "drive");
        assert!(!search.is_pending());

        // Nothing late overrides the submitted query.
        filters.lock().set_search_query("other");
        tokio::time::sleep(DELAY * 2).await;
        assert_eq!(applied(&filters), "other");
        assert!(search.suggestions().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_suggestion() {
        let (mut search, filters) = search_box();

        search.input("jacket", titles());
        tokio::time::sleep(DELAY * 2).await;
        assert_eq!(search.suggestions().len(), 2);

        search.select_suggestion("Rain Jacket Women Windbreaker");
        assert_eq!(applied(&filters), "Rain Jacket Women Windbreaker");
        assert_eq!(search.query(), "Rain Jacket Women Windbreaker");
        assert!(search.suggestions().is_empty());
        assert!(!search.view().focused);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_hides_suggestions_but_keeps_search() {
        let (mut search, filters) = search_box();

        search.input("hard", titles());
        tokio::time::sleep(DELAY * 2).await;
        assert_eq!(search.suggestions().len(), 1);

        search.dismiss();
        assert!(search.suggestions().is_empty());
        assert_eq!(applied(&filters), "hard");
    }
}
