//! Metrics collection and exposition.
//!
//! # Metrics
//! - `toad_health_checks_total` (counter): health checks by outcome
//! - `toad_actions_total` (counter): applied actions by name
//! - `toad_store_errors_total` (counter): failed store calls by operation
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed, so tests and the
//!   CLI probe never need an exporter
//! - Prometheus exporter is opt-in via `observability.metrics_enabled`

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_health_check(outcome: &'static str) {
    metrics::counter!("toad_health_checks_total", "outcome" => outcome).increment(1);
}

pub fn record_action(action: &'static str) {
    metrics::counter!("toad_actions_total", "action" => action).increment(1);
}

pub fn record_store_error(op: &'static str) {
    metrics::counter!("toad_store_errors_total", "op" => op).increment(1);
}
