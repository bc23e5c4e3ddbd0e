//! Shopping Cart Domain Module
//!
//! This module contains all shopping cart business logic, including:
//! - Domain models (CartItem, CartState, OrderSummary, inputs)
//! - Business logic helpers (totals, tax and shipping, formatting)
//! - The persisted cart store
//! - REST API handlers

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod state;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use models::{CartItem, CartState};
pub use state::CartStore;
