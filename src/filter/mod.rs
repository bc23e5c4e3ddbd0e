//! Filter Domain Module
//!
//! Category, price, sort and search filters, and the pure derivation that
//! turns the product list into one page of results.

pub mod derive;
pub mod handlers;
pub mod models;
pub mod state;

pub use handlers::routes;
pub use models::{FilterState, SortKey};
pub use state::FilterStore;
