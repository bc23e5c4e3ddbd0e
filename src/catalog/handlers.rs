//! Catalog page and product detail handlers

use super::models::{DetailView, ListingQuery, ListingView, Product, RefreshResponse};
use super::state::{PRODUCTS_ERROR, PRODUCT_ERROR};
use crate::error::AppError;
use crate::filter::derive::{apply_filters, page_numbers, paginate, related_products, RELATED_LIMIT};
use crate::state::SharedState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::error;

/// Creates routes for catalog browsing
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:id", get(product_detail))
        .route("/categories", get(list_categories))
        .route("/categories/:name/products", get(category_products))
        .route("/catalog/refresh", post(refresh_catalog))
}

/// Endpoint: GET /products
/// The catalog page: filtered, sorted and paginated products.
async fn list_products(
    State(state): State<SharedState>,
    Query(params): Query<ListingQuery>,
) -> Result<Json<ListingView>, AppError> {
    state.ensure_catalog().await;

    let products = state.catalog.products();
    if let Some(message) = products.error {
        return Err(AppError::Catalog(message));
    }

    if let Some(query) = params.query.filter(|q| !q.is_empty()) {
        state.filters.lock().set_search_query(query.clone());
        state.search.lock().sync_query(query);
    }

    let (filters, has_active_filters) = {
        let store = state.filters.lock();
        (store.state().clone(), store.has_active_filters())
    };

    let derived: Vec<Product> = apply_filters(&products.data, &filters)
        .into_iter()
        .cloned()
        .collect();
    let page = paginate(&derived, params.page.unwrap_or(1), state.page_size);
    let page_links = page_numbers(page.page, page.total_pages);

    Ok(Json(ListingView {
        product_count: derived.len(),
        products: page,
        page_numbers: page_links,
        filters,
        has_active_filters,
        categories: state.catalog.categories().data,
        cart_quantity: state.cart.lock().quantity(),
    }))
}

/// Endpoint: GET /products/:id
/// A single product with others from its category.
async fn product_detail(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<Json<DetailView>, AppError> {
    let product = state
        .catalog
        .fetch_product(id)
        .await
        .map_err(|e| AppError::from_lookup(e, PRODUCT_ERROR))?;

    state.ensure_catalog().await;
    let products = state.catalog.products();
    // Nothing related while the product list is in error
    let related = match products.error {
        Some(_) => Vec::new(),
        None => related_products(&product, &products.data, RELATED_LIMIT)
            .into_iter()
            .cloned()
            .collect(),
    };

    Ok(Json(DetailView {
        product,
        related,
        cart_quantity: state.cart.lock().quantity(),
    }))
}

/// Endpoint: GET /categories
async fn list_categories(
    State(state): State<SharedState>,
) -> Result<Json<Vec<String>>, AppError> {
    state.ensure_catalog().await;

    let categories = state.catalog.categories();
    match categories.error {
        Some(message) => Err(AppError::Catalog(message)),
        None => Ok(Json(categories.data)),
    }
}

/// Endpoint: GET /categories/:name/products
async fn category_products(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Product>>, AppError> {
    match state.catalog.fetch_products_in_category(&name).await {
        Ok(products) => Ok(Json(products)),
        Err(e) => {
            error!("{PRODUCTS_ERROR} in {name}: {e}");
            Err(AppError::Catalog(PRODUCTS_ERROR.to_string()))
        }
    }
}

/// Endpoint: POST /catalog/refresh
/// Manual retry after a failed load.
async fn refresh_catalog(
    State(state): State<SharedState>,
) -> Result<Json<RefreshResponse>, AppError> {
    state.catalog.refresh().await;

    let products = state.catalog.products();
    if let Some(message) = products.error {
        return Err(AppError::Catalog(message));
    }

    Ok(Json(RefreshResponse {
        products: products.data.len(),
        categories: state.catalog.categories().data.len(),
    }))
}
