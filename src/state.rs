//! Application State
//!
//! Every store is its own container; [`AppState`] only bundles them for
//! the handlers.

use crate::cart::CartStore;
use crate::catalog::{CatalogSource, CatalogStore};
use crate::config::Config;
use crate::filter::FilterStore;
use crate::search::SearchBox;
use crate::storage::SharedStore;
use crate::theme::models::ResolvedTheme;
use crate::theme::{spawn_system_watcher, ThemeStore};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Stores behind the storefront views.
///
/// Locks are never held across an `.await`.
pub struct AppState {
    pub catalog: CatalogStore,
    pub cart: Mutex<CartStore>,
    pub filters: Arc<Mutex<FilterStore>>,
    pub theme: Arc<Mutex<ThemeStore>>,
    pub search: Mutex<SearchBox>,

    /// Products per catalog page
    pub page_size: usize,

    /// Inbox for OS color-scheme notifications
    system_scheme: watch::Sender<ResolvedTheme>,
}

impl AppState {
    /// Builds the stores, restoring persisted ones from `storage`, and starts
    /// the OS theme watcher.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(
        config: &Config,
        source: Arc<dyn CatalogSource>,
        storage: SharedStore,
    ) -> SharedState {
        // No OS signal reaches a headless process before the first
        // notification, so the system scheme starts out light.
        let initial_scheme = ResolvedTheme::Light;

        let filters = Arc::new(Mutex::new(FilterStore::new()));
        let theme = Arc::new(Mutex::new(ThemeStore::load(
            Arc::clone(&storage),
            initial_scheme,
        )));
        let search = SearchBox::new(
            Arc::clone(&filters),
            config.debounce(),
            config.search.max_suggestions,
        );

        let (system_scheme, schemes) = watch::channel(initial_scheme);
        spawn_system_watcher(Arc::clone(&theme), schemes);

        Arc::new(Self {
            catalog: CatalogStore::new(source),
            cart: Mutex::new(CartStore::load(storage)),
            filters,
            theme,
            search: Mutex::new(search),
            page_size: config.catalog.page_size,
            system_scheme,
        })
    }

    /// Relays an OS color-scheme change to the theme watcher.
    pub fn notify_system_scheme(&self, scheme: ResolvedTheme) {
        self.system_scheme.send_replace(scheme);
    }

    /// Loads whatever part of the catalog has never been requested. Returns
    /// once no list load is in flight.
    pub async fn ensure_catalog(&self) {
        self.catalog.ensure_loaded().await;
    }
}
