//! `/api/locations` proxy routes → Location Service.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method};
use axum::response::Response;

use crate::http::request::parse_json_body;
use crate::http::server::AppState;
use crate::proxy::{ProxyCall, ServiceKind};

const LOCATION: ServiceKind = ServiceKind::Location;

pub async fn list_locations(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let call = ProxyCall::new(Method::GET).segments(["locations"]);
    state.forward(LOCATION, call, &headers).await
}

pub async fn create_location(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let body = match parse_json_body(&body) {
        Ok(body) => body,
        Err(rejection) => return rejection,
    };
    let call = ProxyCall::new(Method::POST).segments(["locations"]).body(body);
    state.forward(LOCATION, call, &headers).await
}

pub async fn get_location(
    State(state): State<AppState>,
    Path(location_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let call = ProxyCall::new(Method::GET).segments(["locations", location_id.as_str()]);
    state.forward(LOCATION, call, &headers).await
}

/// Success replies `{"success": true}` whatever the upstream returned.
pub async fn delete_location(
    State(state): State<AppState>,
    Path(location_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let call = ProxyCall::new(Method::DELETE)
        .segments(["locations", location_id.as_str()])
        .acknowledge();
    state.forward(LOCATION, call, &headers).await
}
