use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors produced by the store layer.
///
/// Only storage faults live here. Logic failures (duplicate signup, wrong
/// password, duplicate join) are ordinary outcome values.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Storage file could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value is not valid JSON for the expected record type.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A thread panicked while holding a store lock.
    #[error("Store lock poisoned")]
    Poisoned,
}

/// Convenience alias used throughout the store module.
pub type Result<T> = std::result::Result<T, StoreError>;

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Demo store failure");
        let body = serde_json::json!({
            "error": "Demo store unavailable",
        });
        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}
