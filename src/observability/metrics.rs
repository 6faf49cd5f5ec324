//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_upstream_requests_total` (counter): upstream calls by service, method, status
//! - `gateway_upstream_duration_seconds` (histogram): upstream latency by service
//! - `gateway_upstream_failures_total` (counter): transport failures and timeouts by service
//! - `gateway_store_mutations_total` (counter): demo store writes by operation

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_upstream_request(service: &'static str, method: &str, status: u16, start: Instant) {
    counter!(
        "gateway_upstream_requests_total",
        "service" => service,
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("gateway_upstream_duration_seconds", "service" => service)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_upstream_failure(service: &'static str, method: &str, start: Instant) {
    counter!(
        "gateway_upstream_failures_total",
        "service" => service,
        "method" => method.to_string()
    )
    .increment(1);
    histogram!("gateway_upstream_duration_seconds", "service" => service)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_store_mutation(operation: &'static str) {
    counter!("gateway_store_mutations_total", "operation" => operation).increment(1);
}
