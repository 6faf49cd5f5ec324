//! Response helpers.
//!
//! Every error the gateway produces itself is a JSON envelope
//! `{"error": "<message>"}`, matching what the upstream wrappers return.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let message: String = message.into();
    (status, Json(json!({ "error": message }))).into_response()
}
