//! REST API handlers for shopping cart operations
//!
//! This module implements the HTTP endpoints behind the cart page.

use super::{
    models::{AddToCartInput, CartView, UpdateQuantityInput},
    state::CartStore,
};
use crate::catalog::state::PRODUCT_ERROR;
use crate::error::{payload, AppError};
use crate::state::SharedState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, patch, post},
    Json, Router,
};

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart", get(view_cart).delete(clear_cart))
        .route("/cart/items", post(add_item))
        .route("/cart/items/:id", patch(update_item).delete(remove_item))
}

fn cart_view(cart: &CartStore) -> CartView {
    CartView {
        cart: cart.snapshot(),
        summary: cart.summary(),
    }
}

/// Endpoint: GET /cart
async fn view_cart(State(state): State<SharedState>) -> Json<CartView> {
    Json(cart_view(&state.cart.lock()))
}

/// Endpoint: POST /cart/items
/// Adds a catalog product to the cart, merging with an existing line.
async fn add_item(
    State(state): State<SharedState>,
    body: Result<Json<AddToCartInput>, JsonRejection>,
) -> Result<Json<CartView>, AppError> {
    let input = payload(body)?;
    if input.quantity == 0 {
        return Err(AppError::MalformedPayload(
            "quantity must be positive".to_string(),
        ));
    }

    let product = state
        .catalog
        .lookup(input.product_id)
        .await
        .map_err(|e| AppError::from_lookup(e, PRODUCT_ERROR))?;

    let mut cart = state.cart.lock();
    cart.add_to_cart(product, input.quantity);
    Ok(Json(cart_view(&cart)))
}

/// Endpoint: PATCH /cart/items/:id
/// Zero or a negative quantity removes the line.
async fn update_item(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
    body: Result<Json<UpdateQuantityInput>, JsonRejection>,
) -> Result<Json<CartView>, AppError> {
    let input = payload(body)?;

    let mut cart = state.cart.lock();
    cart.update_quantity(id, input.quantity);
    Ok(Json(cart_view(&cart)))
}

/// Endpoint: DELETE /cart/items/:id
async fn remove_item(State(state): State<SharedState>, Path(id): Path<u64>) -> Json<CartView> {
    let mut cart = state.cart.lock();
    cart.remove_from_cart(id);
    Json(cart_view(&cart))
}

/// Endpoint: DELETE /cart
async fn clear_cart(State(state): State<SharedState>) -> Json<CartView> {
    let mut cart = state.cart.lock();
    cart.clear_cart();
    Json(cart_view(&cart))
}
