//! Theme Module
//!
//! Light/dark/system preference, its resolution against the OS color
//! scheme, and the HTTP handlers exposing it.

pub mod handlers;
pub mod models;
pub mod state;

pub use handlers::routes;
pub use state::{spawn_system_watcher, ThemeStore};
