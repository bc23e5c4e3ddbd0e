//! Theme switcher handlers

use super::models::{SetThemeInput, SystemSchemeInput, ThemeView};
use crate::error::{payload, AppError};
use crate::state::SharedState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

/// Creates routes for the theme switcher
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/theme", get(view_theme).put(set_theme))
        .route("/theme/toggle", post(toggle_theme))
        .route("/theme/system", post(system_scheme))
}

/// Endpoint: GET /theme
async fn view_theme(State(state): State<SharedState>) -> Json<ThemeView> {
    Json(state.theme.lock().view())
}

/// Endpoint: PUT /theme
async fn set_theme(
    State(state): State<SharedState>,
    body: Result<Json<SetThemeInput>, JsonRejection>,
) -> Result<Json<ThemeView>, AppError> {
    let input = payload(body)?;

    let mut theme = state.theme.lock();
    theme.set_theme(input.theme);
    Ok(Json(theme.view()))
}

/// Endpoint: POST /theme/toggle
async fn toggle_theme(State(state): State<SharedState>) -> Json<ThemeView> {
    let mut theme = state.theme.lock();
    theme.toggle_theme();
    Json(theme.view())
}

/// Endpoint: POST /theme/system
/// OS color-scheme notification. Applied asynchronously by the watcher.
async fn system_scheme(
    State(state): State<SharedState>,
    body: Result<Json<SystemSchemeInput>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let input = payload(body)?;
    state.notify_system_scheme(input.scheme);
    Ok(StatusCode::ACCEPTED)
}
