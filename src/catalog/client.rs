//! Product API clients
//!
//! [`CatalogSource`] is the seam between the catalog store and the network.
//! [`HttpCatalog`] talks to the real API; [`StaticCatalog`] serves a fixed
//! product list from memory.

use super::models::Product;
use crate::error::CatalogError;
use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Read-only access to the product catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// `GET /products`
    async fn products(&self) -> Result<Vec<Product>, CatalogError>;

    /// `GET /products/{id}`
    async fn product(&self, id: u64) -> Result<Product, CatalogError>;

    /// `GET /products/categories`
    async fn categories(&self) -> Result<Vec<String>, CatalogError>;

    /// `GET /products/category/{name}`
    async fn products_in_category(&self, category: &str) -> Result<Vec<Product>, CatalogError>;
}

/// HTTP client for the public product API.
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCatalog {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let base_url =
            Url::parse(base_url).map_err(|_| CatalogError::InvalidUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("storefront/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, CatalogError> {
        let url = self.endpoint(segments)?;
        debug!("GET {url}");

        let response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(CatalogError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        self.get_json(&["products"]).await
    }

    async fn product(&self, id: u64) -> Result<Product, CatalogError> {
        let id = id.to_string();
        self.get_json(&["products", &id]).await
    }

    async fn categories(&self) -> Result<Vec<String>, CatalogError> {
        self.get_json(&["products", "categories"]).await
    }

    async fn products_in_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        self.get_json(&["products", "category", category]).await
    }
}

/// Serves a fixed product list without touching the network.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.clone())
    }

    async fn product(&self, id: u64) -> Result<Product, CatalogError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    async fn categories(&self) -> Result<Vec<String>, CatalogError> {
        let mut categories: Vec<String> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        Ok(categories)
    }

    async fn products_in_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        Ok(self
            .products
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::sample_product;

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = HttpCatalog::new("https://fakestoreapi.com", Duration::from_secs(5)).unwrap();

        let url = client
            .endpoint(&["products", "category", "men's clothing"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://fakestoreapi.com/products/category/men's%20clothing"
        );

        let url = client.endpoint(&["products", "7"]).unwrap();
        assert_eq!(url.as_str(), "https://fakestoreapi.com/products/7");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client =
            HttpCatalog::new("http://localhost:9000/api/", Duration::from_secs(5)).unwrap();
        let url = client.endpoint(&["products"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/api/products");
    }

    #[test]
    fn test_rejects_invalid_base() {
        assert!(matches!(
            HttpCatalog::new("not a url", Duration::from_secs(5)),
            Err(CatalogError::InvalidUrl(_))
        ));
        assert!(matches!(
            HttpCatalog::new("mailto:shop@example.com", Duration::from_secs(5)),
            Err(CatalogError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_static_catalog() {
        let catalog = StaticCatalog::new(vec![
            sample_product(1, "Backpack", 109.95, "men's clothing"),
            sample_product(2, "Ring", 9.99, "jewelery"),
            sample_product(3, "Jacket", 55.99, "men's clothing"),
        ]);

        assert_eq!(
            catalog.categories().await.unwrap(),
            vec!["men's clothing".to_string(), "jewelery".to_string()]
        );
        assert_eq!(catalog.product(2).await.unwrap().title, "Ring");
        assert!(matches!(
            catalog.product(42).await,
            Err(CatalogError::NotFound(42))
        ));
        assert_eq!(
            catalog
                .products_in_category("men's clothing")
                .await
                .unwrap()
                .len(),
            2
        );
    }
}
