//! Shopping Cart State Management
//!
//! [`CartStore`] owns the cart lines and keeps the derived figures in step
//! with them. Every mutation is written through to storage.

use super::helpers::{cart_quantity, cart_total, format_item_summary, order_summary};
use super::models::{CartItem, CartState, OrderSummary};
use crate::catalog::models::Product;
use crate::storage::{load_json, save_json, SharedStore, CART_STORAGE_KEY};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Persisted shape: items only. Totals in storage are never read back.
#[derive(Serialize)]
struct PersistedCartRef<'a> {
    items: &'a [CartItem],
}

#[derive(Deserialize)]
struct PersistedCart {
    #[serde(default)]
    items: Vec<CartItem>,
}

pub struct CartStore {
    items: Vec<CartItem>,
    total: f64,
    quantity: u32,
    storage: SharedStore,
}

impl CartStore {
    /// Restores the cart from storage.
    ///
    /// Derived figures are recomputed here from the stored items, whatever
    /// else the stored record claims. Lines with a zero quantity are
    /// dropped and repeated products merged. Missing or malformed records
    /// give an empty cart.
    pub fn load(storage: SharedStore) -> Self {
        let stored = load_json::<PersistedCart>(storage.as_ref(), CART_STORAGE_KEY)
            .map(|cart| cart.items)
            .unwrap_or_default();

        let mut items: Vec<CartItem> = Vec::with_capacity(stored.len());
        for item in stored {
            if item.quantity == 0 {
                warn!("Dropping stored cart line for {} with no quantity", item.product.id);
                continue;
            }
            match items.iter_mut().find(|i| i.product.id == item.product.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity)
                }
                None => items.push(item),
            }
        }

        let mut store = Self {
            items,
            total: 0.0,
            quantity: 0,
            storage,
        };
        store.recompute();
        info!(
            "Cart restored with {} line(s), {} item(s)",
            store.items.len(),
            store.quantity
        );
        store
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn item(&self, product_id: u64) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product.id == product_id)
    }

    pub fn snapshot(&self) -> CartState {
        CartState {
            items: self.items.clone(),
            total: self.total,
            quantity: self.quantity,
        }
    }

    pub fn summary(&self) -> OrderSummary {
        order_summary(self.total)
    }

    /// Adds `quantity` of `product`, merging into an existing line.
    pub fn add_to_cart(&mut self, product: Product, quantity: u32) {
        match self.items.iter_mut().find(|i| i.product.id == product.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
            None => {
                info!("Adding {} to cart", product.title);
                self.items.push(CartItem { product, quantity });
            }
        }
        self.commit();
    }

    /// Overwrites a line's quantity in place; zero or less removes it.
    pub fn update_quantity(&mut self, product_id: u64, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(product_id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = quantity;
        }
        self.commit();
    }

    pub fn remove_from_cart(&mut self, product_id: u64) {
        self.items.retain(|i| i.product.id != product_id);
        self.commit();
    }

    pub fn clear_cart(&mut self) {
        if !self.items.is_empty() {
            info!("Clearing cart: {}", format_item_summary(&self.items));
        }
        self.items.clear();
        self.commit();
    }

    fn recompute(&mut self) {
        self.total = cart_total(&self.items);
        self.quantity = cart_quantity(&self.items);
    }

    fn commit(&mut self) {
        self.recompute();
        debug!("Cart now {} item(s), total {:.2}", self.quantity, self.total);

        let record = PersistedCartRef { items: &self.items };
        if let Err(e) = save_json(self.storage.as_ref(), CART_STORAGE_KEY, &record) {
            warn!("Failed to persist cart: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::sample_product;
    use crate::storage::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    fn backpack() -> Product {
        sample_product(1, "Backpack", 109.95, "men's clothing")
    }

    fn ring() -> Product {
        sample_product(2, "Ring", 9.99, "jewelery")
    }

    fn jacket() -> Product {
        sample_product(3, "Jacket", 55.99, "men's clothing")
    }

    fn empty_cart() -> (CartStore, Arc<MemoryStore>) {
        let storage = Arc::new(MemoryStore::new());
        (CartStore::load(storage.clone()), storage)
    }

    fn assert_consistent(cart: &CartStore) {
        let total: f64 = cart
            .items()
            .iter()
            .map(|i| i.product.price * f64::from(i.quantity))
            .sum();
        let quantity: u32 = cart.items().iter().map(|i| i.quantity).sum();
        assert!((cart.total() - total).abs() < 1e-9);
        assert_eq!(cart.quantity(), quantity);
    }

    #[test]
    fn test_add_merges_same_product() {
        let (mut cart, _) = empty_cart();
        cart.add_to_cart(backpack(), 2);
        cart.add_to_cart(backpack(), 3);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item(1).unwrap().quantity, 5);
        assert_consistent(&cart);
    }

    #[test]
    fn test_invariant_holds_after_every_mutation() {
        let (mut cart, _) = empty_cart();

        cart.add_to_cart(backpack(), 1);
        assert_consistent(&cart);
        cart.add_to_cart(ring(), 4);
        assert_consistent(&cart);
        cart.add_to_cart(jacket(), 2);
        assert_consistent(&cart);
        cart.update_quantity(2, 7);
        assert_consistent(&cart);
        cart.remove_from_cart(1);
        assert_consistent(&cart);
        cart.update_quantity(99, 3);
        assert_consistent(&cart);
        cart.add_to_cart(backpack(), 1);
        assert_consistent(&cart);

        assert_eq!(cart.quantity(), 7 + 2 + 1);
    }

    #[test]
    fn test_update_preserves_position() {
        let (mut cart, _) = empty_cart();
        cart.add_to_cart(backpack(), 1);
        cart.add_to_cart(ring(), 1);
        cart.add_to_cart(jacket(), 1);

        cart.update_quantity(2, 6);

        let ids: Vec<u64> = cart.items().iter().map(|i| i.product.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(cart.items()[1].quantity, 6);
    }

    #[test]
    fn test_update_to_zero_equals_remove() {
        let (mut updated, _) = empty_cart();
        let (mut removed, _) = empty_cart();
        for cart in [&mut updated, &mut removed] {
            cart.add_to_cart(backpack(), 2);
            cart.add_to_cart(ring(), 1);
        }

        updated.update_quantity(1, 0);
        removed.remove_from_cart(1);
        assert_eq!(updated.snapshot(), removed.snapshot());

        updated.update_quantity(2, -4);
        assert!(updated.items().is_empty());
    }

    #[test]
    fn test_clear_cart() {
        let (mut cart, _) = empty_cart();
        cart.add_to_cart(backpack(), 2);
        cart.add_to_cart(ring(), 1);

        cart.clear_cart();
        assert!(cart.items().is_empty());
        assert_eq!(cart.total(), 0.0);
        assert_eq!(cart.quantity(), 0);

        cart.clear_cart();
        assert_eq!(cart.quantity(), 0);
    }

    #[test]
    fn test_every_mutation_is_written_through() {
        let (mut cart, storage) = empty_cart();

        cart.add_to_cart(ring(), 2);
        let reloaded = CartStore::load(storage.clone());
        assert_eq!(reloaded.snapshot(), cart.snapshot());

        cart.update_quantity(2, 5);
        assert_eq!(CartStore::load(storage.clone()).quantity(), 5);

        cart.clear_cart();
        assert!(CartStore::load(storage).items().is_empty());
    }

    #[test]
    fn test_stored_totals_are_ignored() {
        let storage = Arc::new(MemoryStore::new());
        let item = serde_json::to_value(CartItem {
            product: ring(),
            quantity: 3,
        })
        .unwrap();
        let raw = serde_json::json!({
            "state": { "items": [item], "total": 999.0, "quantity": 42 },
            "version": 0
        });
        storage.set(CART_STORAGE_KEY, raw.to_string()).unwrap();

        let cart = CartStore::load(storage);
        assert_eq!(cart.quantity(), 3);
        assert!((cart.total() - 9.99 * 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_load_normalizes_stored_lines() {
        let storage = Arc::new(MemoryStore::new());
        let lines = serde_json::json!({
            "state": {
                "items": [
                    { "product": serde_json::to_value(ring()).unwrap(), "quantity": 1 },
                    { "product": serde_json::to_value(backpack()).unwrap(), "quantity": 0 },
                    { "product": serde_json::to_value(ring()).unwrap(), "quantity": 2 }
                ]
            },
            "version": 0
        });
        storage.set(CART_STORAGE_KEY, lines.to_string()).unwrap();

        let cart = CartStore::load(storage);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item(2).unwrap().quantity, 3);
        assert_consistent(&cart);
    }

    #[test]
    fn test_malformed_storage_falls_back_to_empty() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(CART_STORAGE_KEY, "{\"state\": {\"items\": 12}}".into()).unwrap();

        let cart = CartStore::load(storage);
        assert!(cart.items().is_empty());
        assert_eq!(cart.total(), 0.0);
    }
}
