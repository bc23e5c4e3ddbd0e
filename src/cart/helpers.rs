//! Shopping Cart Business Logic Helpers
//!
//! This module contains the derived-figure computations and formatting
//! used by the cart.

use super::models::{CartItem, OrderSummary};

/// Sales tax applied to the subtotal
pub const TAX_RATE: f64 = 0.08;
/// Subtotals above this ship for free
pub const FREE_SHIPPING_THRESHOLD: f64 = 50.0;
/// Shipping charged at or below the threshold
pub const FLAT_SHIPPING: f64 = 9.99;

/// Σ price × quantity
pub fn cart_total(items: &[CartItem]) -> f64 {
    items
        .iter()
        .map(|i| i.product.price * f64::from(i.quantity))
        .sum()
}

/// Σ quantity
pub fn cart_quantity(items: &[CartItem]) -> u32 {
    items
        .iter()
        .fold(0u32, |sum, i| sum.saturating_add(i.quantity))
}

/// Builds the order summary for a cart subtotal.
pub fn order_summary(subtotal: f64) -> OrderSummary {
    let tax = subtotal * TAX_RATE;
    let shipping = if subtotal > FREE_SHIPPING_THRESHOLD {
        0.0
    } else {
        FLAT_SHIPPING
    };
    let free_shipping_remaining = if subtotal < FREE_SHIPPING_THRESHOLD {
        FREE_SHIPPING_THRESHOLD - subtotal
    } else {
        0.0
    };

    OrderSummary {
        subtotal,
        tax,
        shipping,
        total: subtotal + tax + shipping,
        free_shipping_remaining,
    }
}

/// Produces a human-readable one-line summary for a list of cart items.
///
/// Example output: `"2x Backpack, 1x Ring"`.
pub fn format_item_summary(items: &[CartItem]) -> String {
    items
        .iter()
        .map(|i| format!("{}x {}", i.quantity, i.product.title))
        .collect::<Vec<_>>()
        .join(", ")
}
