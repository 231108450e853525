//! Replay orchestration
//!
//! Selects gap candidates from daily bars, replays each one's intraday
//! session through the signal detector, and emits events to the sink at a
//! throttled, human-watchable pace. One symbol's bad data or failed fetch
//! never aborts the rest of the run.

use super::gap::{gap_candidate, rank_candidates, GapCandidate};
use crate::bars::{filter_to_date, last_session_date};
use crate::signal::{premarket_high, Event, SignalDetector};
use crate::sink::EventSink;
use crate::source::{BarSource, Interval, Period};
use crate::telemetry::{increment_counter, set_gauge, CounterMetric, GaugeMetric};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

/// Capacity of the change-notification channel
const NOTIFY_CAPACITY: usize = 256;

/// An event paired with the symbol it was emitted for
#[derive(Debug, Clone)]
pub struct SymbolEvent {
    /// Ticker symbol
    pub symbol: String,
    /// The emitted event
    pub event: Event,
}

/// Replay configuration
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Symbol universe to scan
    pub tickers: Vec<String>,
    /// Keep at most this many ranked gappers
    pub top_n: usize,
    /// Minimum gap percentage to retain a candidate
    pub gap_threshold_pct: Decimal,
    /// Time-of-day before which bars count as premarket
    pub premarket_cutoff: NaiveTime,
    /// Lookback window for daily and intraday fetches
    pub lookback: Period,
    /// Base delay between emitted events; `None` disables pacing
    pub pace: Option<Duration>,
    /// Pacing multiplier, > 1.0 slows the replay
    pub speed: f64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            tickers: Vec::new(),
            top_n: 10,
            gap_threshold_pct: dec!(0.1),
            premarket_cutoff: crate::signal::default_cutoff(),
            lookback: Period::days(10),
            pace: Some(Duration::from_millis(200)),
            speed: 1.0,
        }
    }
}

/// Outcome counts for one replay run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Candidates that passed the gap threshold
    pub candidates: usize,
    /// Symbols whose session was replayed through the detector
    pub symbols_replayed: usize,
    /// Events delivered to the sink
    pub events_emitted: u64,
    /// Symbols skipped for missing data or per-symbol errors
    pub symbols_skipped: usize,
}

/// Drives a full replay pass over the configured universe
pub struct ReplayDriver<S, K> {
    source: Arc<S>,
    sink: Arc<K>,
    detector: SignalDetector,
    config: ReplayConfig,
    notify_tx: broadcast::Sender<SymbolEvent>,
}

impl<S: BarSource, K: EventSink> ReplayDriver<S, K> {
    /// Create a new driver
    pub fn new(source: Arc<S>, sink: Arc<K>, detector: SignalDetector, config: ReplayConfig) -> Self {
        let (notify_tx, _) = broadcast::channel(NOTIFY_CAPACITY);
        Self {
            source,
            sink,
            detector,
            config,
            notify_tx,
        }
    }

    /// Replay configuration in use
    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// Subscribe to sink-committed events
    ///
    /// Notification is fire-and-forget over a bounded broadcast channel: a
    /// slow or dropped subscriber lags or misses events without affecting
    /// the emit path or other subscribers.
    pub fn subscribe(&self) -> broadcast::Receiver<SymbolEvent> {
        self.notify_tx.subscribe()
    }

    /// Run one replay pass
    ///
    /// With no target date, each symbol falls back to its most recent
    /// trading day.
    pub async fn run(&self, target_date: Option<NaiveDate>) -> anyhow::Result<ReplaySummary> {
        let candidates = self.rank_gappers(target_date).await;
        set_gauge(GaugeMetric::GapCandidates, candidates.len() as f64);

        let mut summary = ReplaySummary {
            candidates: candidates.len(),
            ..Default::default()
        };

        if candidates.is_empty() {
            tracing::info!("No gappers found by threshold");
            return Ok(summary);
        }

        for c in &candidates {
            tracing::info!(
                ticker = %c.ticker,
                gap_pct = %c.gap_pct.round_dp(2),
                prev_close = %c.prev_close,
                open = %c.open_price,
                "Gap candidate"
            );
        }

        for candidate in &candidates {
            match self.replay_symbol(candidate, target_date).await {
                Ok(Some(events)) => {
                    summary.symbols_replayed += 1;
                    summary.events_emitted += events;
                }
                Ok(None) => {
                    summary.symbols_skipped += 1;
                    increment_counter(CounterMetric::SymbolsSkipped);
                }
                Err(e) => {
                    summary.symbols_skipped += 1;
                    increment_counter(CounterMetric::SymbolsSkipped);
                    tracing::warn!(ticker = %candidate.ticker, error = %e, "Replay failed, skipping symbol");
                }
            }
        }

        tracing::info!(
            candidates = summary.candidates,
            replayed = summary.symbols_replayed,
            events = summary.events_emitted,
            skipped = summary.symbols_skipped,
            "Replay complete"
        );
        Ok(summary)
    }

    /// Rank the configured universe by gap percentage
    async fn rank_gappers(&self, target_date: Option<NaiveDate>) -> Vec<GapCandidate> {
        let mut found = Vec::new();

        for ticker in &self.config.tickers {
            let daily = match self
                .source
                .get_bars(ticker, self.config.lookback, Interval::Daily)
                .await
            {
                Ok(daily) => daily,
                Err(e) => {
                    tracing::warn!(ticker = %ticker, error = %e, "Daily fetch failed, skipping symbol");
                    continue;
                }
            };

            match gap_candidate(ticker, &daily, target_date) {
                Some(candidate) => found.push(candidate),
                None => {
                    tracing::debug!(ticker = %ticker, "No usable daily rows for gap computation");
                }
            }
        }

        rank_candidates(found, self.config.gap_threshold_pct, self.config.top_n)
    }

    /// Replay one candidate's session
    ///
    /// Returns `Ok(None)` when intraday data is missing (a graceful skip) and
    /// the emitted event count otherwise.
    async fn replay_symbol(
        &self,
        candidate: &GapCandidate,
        target_date: Option<NaiveDate>,
    ) -> anyhow::Result<Option<u64>> {
        let ticker = &candidate.ticker;
        let intraday = self
            .source
            .get_bars(ticker, self.config.lookback, Interval::FiveMinute)
            .await?;

        if intraday.is_empty() {
            tracing::info!(ticker = %ticker, "No intraday bars, skipping");
            return Ok(None);
        }

        let Some(session) = target_date.or_else(|| last_session_date(&intraday)) else {
            return Ok(None);
        };

        let day_bars = filter_to_date(&intraday, session);
        if day_bars.is_empty() {
            tracing::info!(ticker = %ticker, date = %session, "No bars for session, skipping");
            return Ok(None);
        }

        // Premarket reference spans the whole fetch window, not just the
        // replay session.
        let reference = premarket_high(&intraday, self.config.premarket_cutoff);
        tracing::info!(
            ticker = %ticker,
            date = %session,
            bars = day_bars.len(),
            premarket_high = ?reference,
            "Replaying session"
        );

        let events = self.detector.run(&day_bars, reference)?;
        if events.is_empty() {
            tracing::info!(ticker = %ticker, "No signals detected");
            return Ok(Some(0));
        }

        let mut emitted = 0u64;
        for event in &events {
            tracing::info!(
                ticker = %ticker,
                at = %event.timestamp,
                label = %event.label(),
                price = %event.price,
                "Signal event"
            );

            match self.sink.upsert(ticker, event).await {
                Ok(()) => {
                    emitted += 1;
                    increment_counter(CounterMetric::EventsEmitted);
                    // Errors only mean nobody is listening right now
                    let _ = self.notify_tx.send(SymbolEvent {
                        symbol: ticker.clone(),
                        event: event.clone(),
                    });
                }
                Err(e) => {
                    increment_counter(CounterMetric::SinkWriteFailures);
                    tracing::warn!(ticker = %ticker, error = %e, "Sink write failed, continuing");
                }
            }

            if let Some(base) = self.config.pace {
                tokio::time::sleep(base.mul_f64(self.config.speed)).await;
            }
        }

        Ok(Some(emitted))
    }
}
