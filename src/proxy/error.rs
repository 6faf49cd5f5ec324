use std::time::Duration;
use thiserror::Error;

/// Failure to complete an upstream exchange.
///
/// None of these details reach the client. Every variant is rendered as the
/// service's fixed connection-failure envelope and logged server-side.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Connect, DNS, or protocol failure in the HTTP client.
    #[error("transport error: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    /// The upstream did not answer within the configured deadline.
    #[error("upstream timed out after {0:?}")]
    Timeout(Duration),

    /// The upstream URL could not be built.
    #[error("invalid upstream uri: {0}")]
    InvalidUri(String),

    /// Building the outbound request failed.
    #[error("request build error: {0}")]
    Request(#[from] axum::http::Error),

    /// Reading the upstream response body failed or exceeded the size cap.
    #[error("response body error: {0}")]
    Body(#[from] axum::Error),

    /// A success body that should be JSON was not.
    #[error("invalid JSON from upstream: {0}")]
    Decode(#[from] serde_json::Error),
}
