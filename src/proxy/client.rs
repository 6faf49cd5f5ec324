//! Outbound HTTP client for upstream calls.
//!
//! # Design Decisions
//! - One pooled hyper client shared by every handler
//! - Every exchange has a deadline; expiry is a transport failure
//! - Exactly one upstream request per inbound request (no retries)

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderValue, Method, Request, Response, StatusCode, Uri};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::time::{Duration, Instant};
use url::Url;

use crate::config::schema::TimeoutConfig;
use crate::http::request::X_REQUEST_ID;
use crate::observability::metrics;
use crate::proxy::error::ProxyError;

/// A JSON call to an upstream.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub method: Method,
    pub url: Url,
    pub body: Option<serde_json::Value>,
    pub request_id: Option<String>,
}

/// Status and fully buffered body of an upstream reply.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Bytes,
}

impl UpstreamReply {
    /// Raw body as text, for wrapping into error envelopes.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Clone)]
pub struct UpstreamClient {
    client: Client<HttpConnector, Body>,
    timeout: Duration,
    max_body_size: usize,
}

impl UpstreamClient {
    pub fn new(timeouts: &TimeoutConfig, max_body_size: usize) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(timeouts.connect_secs)));

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            client,
            timeout: Duration::from_secs(timeouts.upstream_secs),
            max_body_size,
        }
    }

    /// Send a JSON request and buffer the reply. `label` tags logs/metrics.
    pub async fn send(
        &self,
        label: &'static str,
        request: UpstreamRequest,
    ) -> Result<UpstreamReply, ProxyError> {
        let start = Instant::now();
        let method = request.method.clone();

        let mut builder = Request::builder()
            .method(request.method)
            .uri(to_uri(&request.url)?)
            .header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(id) = request.request_id.as_deref() {
            if let Ok(value) = HeaderValue::from_str(id) {
                builder = builder.header(X_REQUEST_ID, value);
            }
        }
        let body = match request.body {
            Some(value) => Body::from(serde_json::to_vec(&value)?),
            None => Body::empty(),
        };
        let outbound = builder.body(body)?;

        let exchange = async {
            let response = self.client.request(outbound).await?;
            let status = response.status();
            let body = axum::body::to_bytes(Body::new(response.into_body()), self.max_body_size).await?;
            Ok::<_, ProxyError>(UpstreamReply { status, body })
        };

        let result = match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(ProxyError::Timeout(self.timeout)),
        };

        match &result {
            Ok(reply) => {
                metrics::record_upstream_request(label, method.as_str(), reply.status.as_u16(), start)
            }
            Err(_) => metrics::record_upstream_failure(label, method.as_str(), start),
        }
        result
    }

    /// Forward a prepared request and return the streaming response.
    ///
    /// The deadline covers the exchange up to the response head; the body
    /// is streamed back to the caller as it arrives.
    pub async fn send_streaming(
        &self,
        label: &'static str,
        request: Request<Body>,
    ) -> Result<Response<Incoming>, ProxyError> {
        let start = Instant::now();
        let method = request.method().clone();

        let result = match tokio::time::timeout(self.timeout, self.client.request(request)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => Err(ProxyError::Transport(e)),
            Err(_) => Err(ProxyError::Timeout(self.timeout)),
        };

        match &result {
            Ok(response) => metrics::record_upstream_request(
                label,
                method.as_str(),
                response.status().as_u16(),
                start,
            ),
            Err(_) => metrics::record_upstream_failure(label, method.as_str(), start),
        }
        result
    }
}

pub(crate) fn to_uri(url: &Url) -> Result<Uri, ProxyError> {
    url.as_str()
        .parse::<Uri>()
        .map_err(|e| ProxyError::InvalidUri(format!("{}: {}", url, e)))
}
