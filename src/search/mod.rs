//! Search Module
//!
//! Debounced search box with suggestions over product titles.

pub mod debounce;
pub mod handlers;
pub mod helpers;
pub mod models;
pub mod state;

pub use debounce::Debouncer;
pub use handlers::routes;
pub use state::SearchBox;
