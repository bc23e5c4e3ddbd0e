//! Filter panel handlers

use super::models::{CategoryToggleInput, FilterPatch, FilterView};
use super::state::FilterStore;
use crate::error::{payload, AppError};
use crate::state::SharedState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};

/// Creates routes for the filter panel
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/filters", get(view_filters).patch(update_filters))
        .route("/filters/category", post(toggle_category))
        .route("/filters/reset", post(reset_filters))
}

fn filter_view(filters: &FilterStore) -> FilterView {
    FilterView {
        filters: filters.state().clone(),
        has_active_filters: filters.has_active_filters(),
    }
}

/// Pushes the applied query back into the search box. The filters lock must
/// already be released.
fn sync_search(state: &SharedState, view: &FilterView) {
    state
        .search
        .lock()
        .sync_query(view.filters.search_query.clone());
}

/// Endpoint: GET /filters
async fn view_filters(State(state): State<SharedState>) -> Json<FilterView> {
    Json(filter_view(&state.filters.lock()))
}

/// Endpoint: PATCH /filters
/// Absent fields stay as they are; invalid price text is ignored.
async fn update_filters(
    State(state): State<SharedState>,
    body: Result<Json<FilterPatch>, JsonRejection>,
) -> Result<Json<FilterView>, AppError> {
    let patch = payload(body)?;
    let touches_query = patch.search_query.is_some();

    let view = {
        let mut filters = state.filters.lock();
        filters.apply(patch);
        filter_view(&filters)
    };
    if touches_query {
        sync_search(&state, &view);
    }

    Ok(Json(view))
}

/// Endpoint: POST /filters/category
async fn toggle_category(
    State(state): State<SharedState>,
    body: Result<Json<CategoryToggleInput>, JsonRejection>,
) -> Result<Json<FilterView>, AppError> {
    let input = payload(body)?;

    let mut filters = state.filters.lock();
    filters.toggle_category(&input.category, input.checked);
    Ok(Json(filter_view(&filters)))
}

/// Endpoint: POST /filters/reset
async fn reset_filters(State(state): State<SharedState>) -> Json<FilterView> {
    let view = {
        let mut filters = state.filters.lock();
        filters.reset();
        filter_view(&filters)
    };
    sync_search(&state, &view);

    Json(view)
}
