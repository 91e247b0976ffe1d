//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): inbound requests by route, status
//! - `proxy_request_duration_seconds` (histogram): inbound latency by route
//! - `upstream_requests_total` (counter): upstream calls by operation, outcome
//! - `upstream_request_duration_seconds` (histogram): upstream latency
//! - `search_records_dropped_total` (counter): search records without an image
//!
//! Recording is a no-op until `init_metrics` installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(route: &'static str, status: u16, start: Instant) {
    counter!("proxy_requests_total", "route" => route, "status" => status.to_string()).increment(1);
    histogram!("proxy_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_upstream_request(operation: &'static str, outcome: &'static str, start: Instant) {
    counter!("upstream_requests_total", "operation" => operation, "outcome" => outcome).increment(1);
    histogram!("upstream_request_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_dropped_records(count: usize) {
    if count > 0 {
        counter!("search_records_dropped_total").increment(count as u64);
    }
}
