//! Error types for the storefront
//!
//! Every fallible concern gets its own enum; `AppError` is the one the HTTP
//! layer turns into a response.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// Failures talking to the external product API.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error {status}: {url}")]
    Status { status: u16, url: String },

    #[error("product {0} not found")]
    NotFound(u64),

    #[error("invalid API base URL: {0}")]
    InvalidUrl(String),
}

/// Failures reading or writing the local key-value store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Failures loading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("could not write default config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Errors surfaced by the view handlers.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Product {0} not found")]
    ProductNotFound(u64),

    /// The catalog could not be loaded; the client may retry.
    #[error("{0}")]
    Catalog(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, retryable) = match self {
            AppError::MalformedPayload(_) => (StatusCode::BAD_REQUEST, false),
            AppError::ProductNotFound(_) => (StatusCode::NOT_FOUND, false),
            AppError::Catalog(_) => (StatusCode::BAD_GATEWAY, true),
        };

        let body = json!({
            "error": self.to_string(),
            "retryable": retryable,
        });

        (status, Json(body)).into_response()
    }
}

impl AppError {
    /// Maps a failed product lookup: unknown ids become 404, anything else
    /// is reported with `message`.
    pub fn from_lookup(error: CatalogError, message: &str) -> Self {
        match error {
            CatalogError::NotFound(id) => AppError::ProductNotFound(id),
            _ => AppError::Catalog(message.to_string()),
        }
    }
}

/// Unwraps a JSON body, turning rejections into [`AppError::MalformedPayload`].
pub fn payload<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(e) => {
            warn!("Rejected payload: {}", e.body_text());
            Err(AppError::MalformedPayload(e.body_text()))
        }
    }
}
