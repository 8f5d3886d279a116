//! Metrics collection and exposition.
//!
//! # Metrics
//! - `locator_requests_total` (counter): requests by method, status
//! - `locator_request_duration_seconds` (histogram): latency by method
//! - `locator_registry_lookups_total` (counter): RDAP lookups by kind, outcome
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Prometheus scrape endpoint is optional

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a handled request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "locator_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("locator_request_duration_seconds", "method" => method.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record a registry lookup outcome.
pub fn record_lookup(kind: &'static str, success: bool) {
    let outcome = if success { "success" } else { "fallback" };
    metrics::counter!("locator_registry_lookups_total", "kind" => kind, "outcome" => outcome)
        .increment(1);
}
