//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! axum handler (path params, query, JSON body)
//!     → call.rs (ProxyCall: build upstream URL, encode segments)
//!     → client.rs (one hyper request, deadline, buffer reply)
//!     → relay.rs (apply the service's ErrorPolicy)
//!     → Response to client
//! ```
//!
//! # Design Decisions
//! - Stateless: handlers share only immutable config and the pooled client
//! - No retries, no caching, no batching
//! - Transport failures never leak their cause to the client

pub mod call;
pub mod client;
pub mod error;
pub mod relay;
pub mod service;

pub use call::ProxyCall;
pub use client::{UpstreamClient, UpstreamReply, UpstreamRequest};
pub use error::ProxyError;
pub use relay::SuccessBody;
pub use service::{ServiceKind, UpstreamService, Upstreams};
