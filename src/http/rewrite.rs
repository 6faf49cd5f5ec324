//! Fallback handler: prefix rewrites for `/api` paths without an explicit
//! route.
//!
//! Unlike the explicit routes this is a raw pass-through. Method, headers,
//! body, status and response headers are all forwarded as they are.

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderName, Request, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::http::request::request_id;
use crate::http::response::error_response;
use crate::http::server::AppState;

/// Headers that describe one hop and must not be forwarded.
const HOP_BY_HOP: [HeaderName; 6] = [
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::UPGRADE,
];

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP.iter() {
        headers.remove(name);
    }
    headers.remove("keep-alive");
    headers.remove(header::TRANSFER_ENCODING);
}

pub async fn rewrite_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request_id(request.headers()).unwrap_or_else(|| "unknown".to_string());
    let path = request.uri().path().to_string();

    let Some(rule) = state.inner.rewrites.match_request(&request) else {
        tracing::warn!(request_id = %request_id, path = %path, "No route matched");
        return error_response(StatusCode::NOT_FOUND, "No matching route found");
    };

    let target = match rule.rewrite(request.uri()) {
        Some(Ok(uri)) => uri,
        Some(Err(e)) => {
            tracing::warn!(request_id = %request_id, path = %path, error = %e, "Rewrite produced invalid URI");
            return error_response(StatusCode::BAD_REQUEST, "Invalid request path");
        }
        None => return error_response(StatusCode::NOT_FOUND, "No matching route found"),
    };

    tracing::debug!(
        request_id = %request_id,
        rule = %rule.name,
        method = %request.method(),
        upstream = %target,
        "Rewriting request"
    );

    let (mut parts, body) = request.into_parts();
    parts.uri = target;
    strip_hop_by_hop(&mut parts.headers);
    // Let the client derive Host from the target.
    parts.headers.remove(header::HOST);
    let outbound = Request::from_parts(parts, body);

    match state.inner.client.send_streaming("rewrite", outbound).await {
        Ok(response) => {
            let (mut parts, body) = response.into_parts();
            strip_hop_by_hop(&mut parts.headers);
            Response::from_parts(parts, Body::new(body)).into_response()
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                rule = %rule.name,
                upstream = rule.target(),
                error = %e,
                "Upstream connection failed"
            );
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{}에 연결할 수 없습니다", rule.name),
            )
        }
    }
}
