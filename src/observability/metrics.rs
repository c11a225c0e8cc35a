//! Metrics collection and exposition.
//!
//! # Metrics
//! - `ocsp_relay_requests_total` (counter): requests by outcome
//! - `ocsp_relay_request_duration_seconds` (histogram): handler latency
//!
//! Recording is a no-op until [`init_metrics`] installs the recorder.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(outcome: &'static str, start: Instant) {
    metrics::counter!("ocsp_relay_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("ocsp_relay_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
