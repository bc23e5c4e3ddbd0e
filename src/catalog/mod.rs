//! Catalog Domain Module
//!
//! This module contains everything about browsing products:
//! - Domain models (Product, Rating, fetch resources, page views)
//! - API clients behind the `CatalogSource` trait
//! - The session catalog store with loading/error flags
//! - Catalog page and product detail handlers

pub mod client;
pub mod handlers;
pub mod models;
pub mod state;

pub use client::{CatalogSource, HttpCatalog, StaticCatalog};
pub use handlers::routes;
pub use models::{Product, Rating};
pub use state::CatalogStore;
