//! Telemetry module
//!
//! Metrics, logging, and distributed tracing

mod logging;
mod metrics;

pub use logging::{init_logging, LogFormat};
pub use metrics::{
    increment_counter, record_latency, set_gauge, CounterMetric, GaugeMetric, LatencyMetric,
};

use crate::config::TelemetryConfig;

/// Guard that cleans up telemetry on drop
pub struct TelemetryGuard {
    _priv: (),
}

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<TelemetryGuard> {
    init_logging(&config.log_level, config.log_format)?;

    if let Some(ref endpoint) = config.otlp_endpoint {
        // TODO: Set up OpenTelemetry with OTLP exporter
        tracing::info!(endpoint = %endpoint, "OpenTelemetry export configured");
    }

    // TODO: Start metrics server on config.metrics_port

    Ok(TelemetryGuard { _priv: () })
}
