//! Shopping Cart Domain Models
//!
//! This module contains all data structures related to the shopping cart
//! business domain.

use crate::catalog::models::Product;
use serde::{Deserialize, Serialize};

// =============================================================================
// Cart Domain Models
// =============================================================================

/// Returns the default quantity (1) for cart additions
fn default_quantity() -> u32 {
    1
}

/// One line of the cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Snapshot of the product as it was when added
    pub product: Product,

    /// Always positive
    pub quantity: u32,
}

/// Cart contents with their derived figures
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartState {
    pub items: Vec<CartItem>,

    /// Sum of price × quantity over `items`
    pub total: f64,

    /// Sum of quantities over `items`
    pub quantity: u32,
}

/// Price breakdown shown next to the cart
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub subtotal: f64,
    pub tax: f64,
    pub shipping: f64,
    pub total: f64,

    /// How much more to spend for free shipping; 0 once it applies
    pub free_shipping_remaining: f64,
}

/// Input for adding a product to the cart
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartInput {
    pub product_id: u64,

    /// Quantity to add (defaults to 1)
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// Input for overwriting a line's quantity
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityInput {
    /// Zero or less removes the line
    pub quantity: i64,
}

/// Everything the cart page renders
#[derive(Debug, Serialize)]
pub struct CartView {
    #[serde(flatten)]
    pub cart: CartState,

    pub summary: OrderSummary,
}
