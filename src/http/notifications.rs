//! `/api/notifications` proxy routes → Notification Service.
//!
//! This family relays upstream status and body as they are (passthrough
//! policy by default).

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method};
use axum::response::Response;

use crate::http::request::parse_json_body;
use crate::http::server::AppState;
use crate::proxy::{ProxyCall, ServiceKind};

const NOTIFICATION: ServiceKind = ServiceKind::Notification;

/// `?userId=` narrows the list to one user's notifications.
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let call = match params.get("userId").filter(|id| !id.is_empty()) {
        Some(user_id) => ProxyCall::new(Method::GET)
            .segments(["notifications", "user", user_id.as_str()]),
        None => ProxyCall::new(Method::GET).segments(["notifications"]),
    };
    state.forward(NOTIFICATION, call, &headers).await
}

pub async fn create_notification(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body = match parse_json_body(&body) {
        Ok(body) => body,
        Err(rejection) => return rejection,
    };
    let call = ProxyCall::new(Method::POST).segments(["notifications"]).body(body);
    state.forward(NOTIFICATION, call, &headers).await
}

pub async fn get_notification(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let call = ProxyCall::new(Method::GET).segments(["notifications", id.as_str()]);
    state.forward(NOTIFICATION, call, &headers).await
}

pub async fn update_guest_status(
    State(state): State<AppState>,
    Path((id, guest_id)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body = match parse_json_body(&body) {
        Ok(body) => body,
        Err(rejection) => return rejection,
    };
    let call = ProxyCall::new(Method::PATCH)
        .segments(["notifications", id.as_str(), "guests", guest_id.as_str(), "guest_status"])
        .body(body);
    state.forward(NOTIFICATION, call, &headers).await
}
