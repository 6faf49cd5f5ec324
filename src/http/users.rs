//! `/api/users` proxy routes → User Service.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::Response;

use crate::http::request::parse_json_body;
use crate::http::response::error_response;
use crate::http::server::AppState;
use crate::proxy::{ProxyCall, ServiceKind};

const USER: ServiceKind = ServiceKind::User;

pub async fn list_users(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let call = ProxyCall::new(Method::GET).segments(["users"]);
    state.forward(USER, call, &headers).await
}

pub async fn create_user(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let body = match parse_json_body(&body) {
        Ok(body) => body,
        Err(rejection) => return rejection,
    };
    let call = ProxyCall::new(Method::POST).segments(["users"]).body(body);
    state.forward(USER, call, &headers).await
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let call = ProxyCall::new(Method::GET).segments(["users", user_id.as_str()]);
    state.forward(USER, call, &headers).await
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let call = ProxyCall::new(Method::DELETE).segments(["users", user_id.as_str()]);
    state.forward(USER, call, &headers).await
}

pub async fn login(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let body = match parse_json_body(&body) {
        Ok(body) => body,
        Err(rejection) => return rejection,
    };
    let call = ProxyCall::new(Method::POST).segments(["users", "login"]).body(body);
    state.forward(USER, call, &headers).await
}

pub async fn logout(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let user_id = match params.get("userId").filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => return error_response(StatusCode::BAD_REQUEST, "userId가 필요합니다"),
    };
    let call = ProxyCall::new(Method::POST)
        .segments(["users", "logout"])
        .query("userId", user_id.as_str());
    state.forward(USER, call, &headers).await
}

pub async fn generate_nickname(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let body = match parse_json_body(&body) {
        Ok(body) => body,
        Err(rejection) => return rejection,
    };
    let call = ProxyCall::new(Method::POST)
        .segments(["users", "nickname", "generate"])
        .body(body);
    state.forward(USER, call, &headers).await
}
