//! Catalog State Management
//!
//! Holds the fetched product list, category names and the product shown on
//! the detail page, each with its own loading/error flags.

use super::client::CatalogSource;
use super::models::{Product, Resource};
use crate::error::CatalogError;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, error, info};

pub const PRODUCTS_ERROR: &str = "Failed to fetch products";
pub const CATEGORIES_ERROR: &str = "Failed to fetch categories";
pub const PRODUCT_ERROR: &str = "Failed to fetch product";

/// In-memory catalog for the session.
///
/// Fetches never retry and never fall back to earlier data: a failure leaves
/// the error message in place until the next explicit fetch. In-flight
/// requests are not cancelled, so a late response overwrites whatever a
/// newer one stored.
///
/// List loads started through [`CatalogStore::ensure_loaded`] and
/// [`CatalogStore::refresh`] take the load gate, so readers that go through
/// it never see a list that is still loading.
pub struct CatalogStore {
    source: Arc<dyn CatalogSource>,
    products: RwLock<Resource<Vec<Product>>>,
    categories: RwLock<Resource<Vec<String>>>,
    product: RwLock<Resource<Option<Product>>>,
    /// Every product seen this session, keyed by id
    cache: DashMap<u64, Product>,
    /// Held for the whole of a list load
    load_gate: AsyncMutex<()>,
}

impl CatalogStore {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            products: RwLock::new(Resource::default()),
            categories: RwLock::new(Resource::default()),
            product: RwLock::new(Resource::default()),
            cache: DashMap::new(),
            load_gate: AsyncMutex::new(()),
        }
    }

    pub async fn fetch_products(&self) {
        self.products.write().begin();

        match self.source.products().await {
            Ok(products) => {
                info!("Fetched {} products", products.len());
                self.remember(&products);
                self.products.write().succeed(products);
            }
            Err(e) => {
                error!("{PRODUCTS_ERROR}: {e}");
                self.products.write().fail(PRODUCTS_ERROR);
            }
        }
    }

    pub async fn fetch_categories(&self) {
        self.categories.write().begin();

        match self.source.categories().await {
            Ok(categories) => {
                info!("Fetched {} categories", categories.len());
                self.categories.write().succeed(categories);
            }
            Err(e) => {
                error!("{CATEGORIES_ERROR}: {e}");
                self.categories.write().fail(CATEGORIES_ERROR);
            }
        }
    }

    /// Loads the product shown on the detail page. The outcome is recorded
    /// on the detail resource and also handed back to the caller.
    pub async fn fetch_product(&self, id: u64) -> Result<Product, CatalogError> {
        self.product.write().begin();

        match self.source.product(id).await {
            Ok(product) => {
                self.cache.insert(product.id, product.clone());
                self.product.write().succeed(Some(product.clone()));
                Ok(product)
            }
            Err(e) => {
                error!("{PRODUCT_ERROR} {id}: {e}");
                let mut resource = self.product.write();
                resource.data = None;
                resource.fail(PRODUCT_ERROR);
                Err(e)
            }
        }
    }

    /// Products of one category, straight from the API.
    pub async fn fetch_products_in_category(
        &self,
        category: &str,
    ) -> Result<Vec<Product>, CatalogError> {
        let products = self.source.products_in_category(category).await?;
        self.remember(&products);
        Ok(products)
    }

    /// Resolves a product by id from the session cache, asking the API on a
    /// miss. Leaves the detail-page resource untouched.
    pub async fn lookup(&self, id: u64) -> Result<Product, CatalogError> {
        if let Some(product) = self.cached(id) {
            return Ok(product);
        }

        let product = self.source.product(id).await?;
        self.cache.insert(product.id, product.clone());
        Ok(product)
    }

    pub fn cached(&self, id: u64) -> Option<Product> {
        self.cache.get(&id).map(|p| p.value().clone())
    }

    pub fn products(&self) -> Resource<Vec<Product>> {
        self.products.read().clone()
    }

    pub fn categories(&self) -> Resource<Vec<String>> {
        self.categories.read().clone()
    }

    pub fn product(&self) -> Resource<Option<Product>> {
        self.product.read().clone()
    }

    /// Titles of the loaded products, in catalog order.
    pub fn titles(&self) -> Vec<String> {
        self.products
            .read()
            .data
            .iter()
            .map(|p| p.title.clone())
            .collect()
    }

    /// True until the product list has been requested once. A failed fetch
    /// stays failed until [`CatalogStore::refresh`].
    pub fn needs_products(&self) -> bool {
        let products = self.products.read();
        products.data.is_empty() && products.error.is_none() && !products.loading
    }

    pub fn needs_categories(&self) -> bool {
        let categories = self.categories.read();
        categories.data.is_empty() && categories.error.is_none() && !categories.loading
    }

    /// Loads whatever list has never been requested, or waits for a load
    /// already under way to settle.
    pub async fn ensure_loaded(&self) {
        let _gate = self.load_gate.lock().await;
        if self.needs_products() {
            self.fetch_products().await;
        }
        if self.needs_categories() {
            self.fetch_categories().await;
        }
    }

    /// Manual retry: refetches both lists.
    pub async fn refresh(&self) {
        let _gate = self.load_gate.lock().await;
        debug!("Refreshing catalog");
        self.fetch_products().await;
        self.fetch_categories().await;
    }

    fn remember(&self, products: &[Product]) {
        for product in products {
            self.cache.insert(product.id, product.clone());
        }
    }
}
