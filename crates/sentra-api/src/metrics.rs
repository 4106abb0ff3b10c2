//! Prometheus metrics for the stream server.

use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> PrometheusHandle {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
}

/// Metric names as constants for consistency.
pub mod names {
    // WebSocket metrics
    pub const WS_CONNECTIONS_TOTAL: &str = "sentra_ws_connections_total";
    pub const WS_CONNECTIONS_ACTIVE: &str = "sentra_ws_connections_active";

    // Frame pipeline metrics
    pub const FRAMES_RECEIVED_TOTAL: &str = "sentra_frames_received_total";
    pub const FRAME_ERRORS_TOTAL: &str = "sentra_frame_errors_total";
    pub const MOTION_EVENTS_TOTAL: &str = "sentra_motion_events_total";
    pub const ALERTS_SENT_TOTAL: &str = "sentra_alerts_sent_total";
}

/// Record a new stream connection.
pub fn record_ws_connection() {
    counter!(names::WS_CONNECTIONS_TOTAL).increment(1);
}

/// Update active stream connections gauge.
pub fn set_ws_active_connections(count: i64) {
    gauge!(names::WS_CONNECTIONS_ACTIVE).set(count as f64);
}

/// Record an inbound frame message.
pub fn record_frame_received() {
    counter!(names::FRAMES_RECEIVED_TOTAL).increment(1);
}

/// Record a dropped frame, labeled by failure kind.
pub fn record_frame_error(kind: &'static str) {
    let labels = [("kind", kind)];
    counter!(names::FRAME_ERRORS_TOTAL, &labels).increment(1);
}

/// Record a frame judged to contain motion.
pub fn record_motion_event() {
    counter!(names::MOTION_EVENTS_TOTAL).increment(1);
}

/// Record an alert delivered to the client.
pub fn record_alert_sent() {
    counter!(names::ALERTS_SENT_TOTAL).increment(1);
}
