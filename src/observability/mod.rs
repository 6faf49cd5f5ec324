//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers, proxy client and stores produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters and histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, when enabled)
//! ```
//!
//! # Design Decisions
//! - Request ID flows from the inbound request into upstream calls and logs
//! - Recording metrics without an installed exporter is a no-op

pub mod logging;
pub mod metrics;
