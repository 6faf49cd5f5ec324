//! Request handling helpers.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4) for every inbound request
//! - Extract the request ID for log fields and upstream propagation
//! - Parse optional JSON bodies with a JSON error envelope on failure
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Bodies are parsed leniently: content-type is not required, an empty
//!   body means "no body"

use axum::body::Bytes;
use axum::http::{HeaderMap, HeaderValue, Request, StatusCode};
use axum::response::Response;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::http::response::error_response;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Issues a UUID v4 request id when the client sent none.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeGatewayRequestId;

impl MakeRequestId for MakeGatewayRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// The request id set by the request-id layer, if any.
pub fn request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Parse a JSON body. Empty → `Ok(None)`; malformed → 400 envelope.
pub fn parse_json_body(body: &Bytes) -> Result<Option<Value>, Response> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body).map(Some).map_err(|e| {
        tracing::debug!(error = %e, "Rejected malformed JSON body");
        error_response(StatusCode::BAD_REQUEST, format!("Invalid JSON body: {}", e))
    })
}

/// Parse a required JSON body into `T`. Empty or malformed → 400 envelope.
pub fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, Response> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected JSON body");
        error_response(StatusCode::BAD_REQUEST, format!("Invalid JSON body: {}", e))
    })
}
