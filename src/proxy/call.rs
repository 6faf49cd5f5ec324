//! One proxied invocation: target path, method, body, relay rule.

use axum::http::Method;
use axum::response::Response;
use serde_json::Value;

use crate::proxy::client::{UpstreamClient, UpstreamRequest};
use crate::proxy::relay::{connection_failure, relay, SuccessBody};
use crate::proxy::service::UpstreamService;

/// Builder for a single forwarded request.
///
/// ```ignore
/// ProxyCall::new(Method::GET)
///     .segments(["users", user_id.as_str()])
///     .send(&upstreams.user, &client, request_id)
///     .await
/// ```
#[derive(Debug, Clone)]
pub struct ProxyCall<'a> {
    method: Method,
    segments: Vec<&'a str>,
    query: Vec<(&'a str, &'a str)>,
    body: Option<Value>,
    on_success: SuccessBody,
}

impl<'a> ProxyCall<'a> {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            segments: Vec::new(),
            query: Vec::new(),
            body: None,
            on_success: SuccessBody::Upstream,
        }
    }

    /// Path segments after the base URL. Each is encoded on its own.
    pub fn segments<I>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.segments.extend(segments);
        self
    }

    pub fn query(mut self, key: &'a str, value: &'a str) -> Self {
        self.query.push((key, value));
        self
    }

    pub fn body(mut self, body: Option<Value>) -> Self {
        self.body = body;
        self
    }

    /// Reply `{"success": true}` instead of the upstream body on success.
    pub fn acknowledge(mut self) -> Self {
        self.on_success = SuccessBody::Acknowledge;
        self
    }

    pub async fn send(
        self,
        service: &UpstreamService,
        client: &UpstreamClient,
        request_id: Option<String>,
    ) -> Response {
        let url = match service.url(&self.segments, &self.query) {
            Ok(url) => url,
            Err(e) => return connection_failure(service, &e),
        };

        tracing::debug!(
            request_id = request_id.as_deref().unwrap_or("unknown"),
            service = service.kind.label(),
            method = %self.method,
            upstream = %url,
            "Forwarding request"
        );

        let outcome = client
            .send(
                service.kind.label(),
                UpstreamRequest {
                    method: self.method,
                    url,
                    body: self.body,
                    request_id,
                },
            )
            .await;

        relay(service, outcome, self.on_success)
    }
}
