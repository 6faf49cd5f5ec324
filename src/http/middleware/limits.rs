//! In-flight request cap.
//!
//! # Design Decisions
//! - Rejects instead of queueing: a full gateway answers 503 at once
//! - A permit is held until the response head is produced

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::http::response::error_response;

pub async fn concurrency_limit(
    State(permits): State<Arc<Semaphore>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    match permits.try_acquire_owned() {
        Ok(_permit) => next.run(req).await,
        Err(_) => {
            tracing::warn!(path = %req.uri().path(), "Concurrency limit reached");
            error_response(StatusCode::SERVICE_UNAVAILABLE, "Too many concurrent requests")
        }
    }
}
