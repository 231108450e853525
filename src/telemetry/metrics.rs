//! Prometheus metrics

use std::time::Duration;

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Events delivered to the sink
    EventsEmitted,
    /// Symbols skipped for missing data or per-symbol errors
    SymbolsSkipped,
    /// Failed sink writes
    SinkWriteFailures,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Candidates passing the gap threshold in the latest pass
    GapCandidates,
    /// Symbols currently in the in-play projection
    InPlaySymbols,
}

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Chart API bar fetch
    BarFetch,
    /// One detection pass over a session
    Detection,
}

/// Increment a counter
pub fn increment_counter(metric: CounterMetric) {
    let metric_name = match metric {
        CounterMetric::EventsEmitted => "gapreplay_events_emitted_total",
        CounterMetric::SymbolsSkipped => "gapreplay_symbols_skipped_total",
        CounterMetric::SinkWriteFailures => "gapreplay_sink_write_failures_total",
    };

    // TODO: Record to Prometheus counter
    tracing::debug!(metric = metric_name, "Incrementing counter");
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    let metric_name = match metric {
        GaugeMetric::GapCandidates => "gapreplay_gap_candidates",
        GaugeMetric::InPlaySymbols => "gapreplay_inplay_symbols",
    };

    // TODO: Set Prometheus gauge
    tracing::debug!(metric = metric_name, value = value, "Setting gauge");
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let metric_name = match metric {
        LatencyMetric::BarFetch => "gapreplay_bar_fetch_latency_ms",
        LatencyMetric::Detection => "gapreplay_detection_latency_ms",
    };

    // TODO: Record to Prometheus histogram
    tracing::debug!(
        metric = metric_name,
        value_ms = duration.as_millis(),
        "Recording latency"
    );
}
