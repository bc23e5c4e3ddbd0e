//! Storefront Library
//!
//! This library provides the state and views of a small storefront backed by
//! a remote product catalog: cart, filters, paginated listing, theme and a
//! debounced search box.

// Domain modules
pub mod cart;
pub mod catalog;
pub mod filter;
pub mod search;
pub mod theme;

// Infrastructure
pub mod config;
pub mod error;
pub mod router;
pub mod state;
pub mod storage;
