//! Continuous scan loop
//!
//! Re-runs the candidate-selection and detection pipeline against the most
//! recent session on a fixed interval, keeping the in-play projection fresh
//! for a UI to poll. Pacing is disabled in this mode; each pass emits its
//! events as fast as the sink accepts them.

use crate::replay::{ReplayDriver, ReplaySummary};
use crate::sink::EventSink;
use crate::source::BarSource;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Periodic scanner over the configured universe
pub struct Scanner<S, K> {
    driver: ReplayDriver<S, K>,
    interval: Duration,
}

impl<S: BarSource, K: EventSink> Scanner<S, K> {
    /// Create a scanner that runs a pass every `interval`
    pub fn new(driver: ReplayDriver<S, K>, interval: Duration) -> Self {
        Self { driver, interval }
    }

    /// Run a single scan pass against the most recent session
    pub async fn run_once(&self) -> anyhow::Result<ReplaySummary> {
        self.driver.run(None).await
    }

    /// Run scan passes until the task is cancelled
    ///
    /// A failed pass is logged and the loop keeps going; the next tick gets
    /// a fresh attempt.
    pub async fn run(&self) -> anyhow::Result<()> {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match self.run_once().await {
                Ok(summary) => {
                    tracing::info!(
                        candidates = summary.candidates,
                        events = summary.events_emitted,
                        "Scan pass complete"
                    );
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Scan pass failed");
                }
            }
        }
    }
}
