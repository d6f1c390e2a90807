//! Metrics collection and Prometheus export.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Instant;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub const DB_QUERY_DURATION: &str = "db_query_duration_seconds";
pub const BOOKINGS_CREATED: &str = "flight_bookings_created_total";
pub const FLIGHTS_CREATED: &str = "flight_flights_created_total";
pub const RECORDS_DELETED: &str = "flight_records_deleted_total";

/// Install the Prometheus recorder.
///
/// Safe to call more than once: only the first call installs a recorder.
/// Test binaries spawn several applications in one process.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
        }
        Err(e) => tracing::warn!(error = %e, "Prometheus recorder not installed"),
    }
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

/// Times one database operation into `db_query_duration_seconds`.
pub struct QueryTimer {
    operation: &'static str,
    started: Instant,
}

impl QueryTimer {
    pub fn start(operation: &'static str) -> Self {
        Self {
            operation,
            started: Instant::now(),
        }
    }

    pub fn observe_duration(self) {
        metrics::histogram!(DB_QUERY_DURATION, "operation" => self.operation)
            .record(self.started.elapsed().as_secs_f64());
    }
}

pub fn record_booking_created() {
    metrics::counter!(BOOKINGS_CREATED).increment(1);
}

pub fn record_flight_created() {
    metrics::counter!(FLIGHTS_CREATED).increment(1);
}

pub fn record_deleted(kind: &'static str) {
    metrics::counter!(RECORDS_DELETED, "kind" => kind).increment(1);
}
