//! Turning upstream outcomes into client responses.
//!
//! # Policies
//! - `Wrap`: success → decoded JSON with 200; rejection →
//!   `{"error": "<Service> Error: <raw text>"}` with the upstream status
//! - `Passthrough`: upstream JSON body with the upstream status, always
//!
//! Transport failures are identical under both policies: 500 with
//! `{"error": "<Service>에 연결할 수 없습니다"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};

use crate::config::schema::ErrorPolicy;
use crate::http::response::error_response;
use crate::proxy::client::UpstreamReply;
use crate::proxy::error::ProxyError;
use crate::proxy::service::UpstreamService;

/// What a wrap-policy route returns on upstream success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessBody {
    /// The upstream's decoded JSON.
    Upstream,
    /// A fixed `{"success": true}`.
    Acknowledge,
}

pub fn relay(
    service: &UpstreamService,
    outcome: Result<UpstreamReply, ProxyError>,
    on_success: SuccessBody,
) -> Response {
    let reply = match outcome {
        Ok(reply) => reply,
        Err(e) => return connection_failure(service, &e),
    };

    match service.error_policy {
        ErrorPolicy::Wrap => relay_wrapped(service, reply, on_success),
        ErrorPolicy::Passthrough => relay_passthrough(service, reply),
    }
}

/// The fixed 500 envelope. The cause is logged, never returned.
pub fn connection_failure(service: &UpstreamService, error: &ProxyError) -> Response {
    tracing::error!(
        service = service.kind.label(),
        upstream = %service.base_url,
        error = %error,
        "Upstream connection failed"
    );
    error_response(StatusCode::INTERNAL_SERVER_ERROR, service.connect_failure_message())
}

fn relay_wrapped(service: &UpstreamService, reply: UpstreamReply, on_success: SuccessBody) -> Response {
    if !reply.status.is_success() {
        let text = reply.text();
        tracing::warn!(
            service = service.kind.label(),
            status = reply.status.as_u16(),
            "Upstream rejected request"
        );
        return error_response(reply.status, service.rejection_message(&text));
    }

    match on_success {
        SuccessBody::Acknowledge => (StatusCode::OK, axum::Json(json!({ "success": true }))).into_response(),
        SuccessBody::Upstream => match decode(&reply) {
            Ok(value) => (StatusCode::OK, axum::Json(value)).into_response(),
            Err(e) => connection_failure(service, &e),
        },
    }
}

fn relay_passthrough(service: &UpstreamService, reply: UpstreamReply) -> Response {
    match decode(&reply) {
        Ok(value) => (reply.status, axum::Json(value)).into_response(),
        // A rejection without a JSON body still reaches the caller as one.
        Err(_) if !reply.status.is_success() => {
            error_response(reply.status, service.rejection_message(&reply.text()))
        }
        Err(e) => connection_failure(service, &e),
    }
}

/// Empty bodies decode to `null` so bodiless successes (204, bare DELETE)
/// still relay.
fn decode(reply: &UpstreamReply) -> Result<Value, ProxyError> {
    if reply.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&reply.body)?)
}
