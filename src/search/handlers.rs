//! Search box handlers

use super::models::{SearchInput, SearchView, SelectInput, SubmitInput};
use crate::error::{payload, AppError};
use crate::state::SharedState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};

/// Creates routes for the search box
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/search", get(view_search))
        .route("/search/input", post(input))
        .route("/search/submit", post(submit))
        .route("/search/select", post(select))
        .route("/search/dismiss", post(dismiss))
}

/// Endpoint: GET /search
async fn view_search(State(state): State<SharedState>) -> Json<SearchView> {
    Json(state.search.lock().view())
}

/// Endpoint: POST /search/input
/// A keystroke. Filtering and suggestions follow after the quiet period.
/// Suggestions draw on the catalog, which is loaded first if needed.
async fn input(
    State(state): State<SharedState>,
    body: Result<Json<SearchInput>, JsonRejection>,
) -> Result<Json<SearchView>, AppError> {
    let input = payload(body)?;
    state.ensure_catalog().await;
    let titles = state.catalog.titles();

    let mut search = state.search.lock();
    search.input(input.query, titles);
    Ok(Json(search.view()))
}

/// Endpoint: POST /search/submit
/// Enter: applies the query now. An optional body replaces the text first.
async fn submit(
    State(state): State<SharedState>,
    body: Option<Json<SubmitInput>>,
) -> Json<SearchView> {
    let input = body.map(|Json(input)| input).unwrap_or_default();

    let mut search = state.search.lock();
    match input.query {
        Some(query) => search.select_suggestion(query),
        None => search.submit(),
    }
    Json(search.view())
}

/// Endpoint: POST /search/select
async fn select(
    State(state): State<SharedState>,
    body: Result<Json<SelectInput>, JsonRejection>,
) -> Result<Json<SearchView>, AppError> {
    let input = payload(body)?;

    let mut search = state.search.lock();
    search.select_suggestion(input.suggestion);
    Ok(Json(search.view()))
}

/// Endpoint: POST /search/dismiss
async fn dismiss(State(state): State<SharedState>) -> Json<SearchView> {
    let mut search = state.search.lock();
    search.dismiss();
    Json(search.view())
}
