//! Bar source module
//!
//! Supplies ordered OHLCV bar series for a symbol at a given interval and
//! lookback period. The replay driver treats an empty result as "skip this
//! symbol".

mod chart;

pub use chart::{ChartClient, ChartConfig, CHART_API_URL};

use crate::bars::Bar;
use async_trait::async_trait;
use std::fmt;

/// Bar interval supported by the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    /// One bar per trading day
    Daily,
    /// Five-minute intraday bars
    FiveMinute,
}

impl Interval {
    /// Wire name understood by the chart API
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Daily => "1d",
            Interval::FiveMinute => "5m",
        }
    }
}

/// Lookback period for a bar request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    /// Number of calendar days to look back
    pub days: u32,
}

impl Period {
    /// A lookback of `days` calendar days
    pub fn days(days: u32) -> Self {
        Self { days }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d", self.days)
    }
}

/// Trait for bar source implementations
#[async_trait]
pub trait BarSource: Send + Sync {
    /// Fetch bars for a symbol, ordered by timestamp ascending
    ///
    /// Returns an empty vector when the provider has no data for the symbol
    /// or range; callers treat that as a per-symbol skip, not an error.
    async fn get_bars(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
    ) -> anyhow::Result<Vec<Bar>>;
}
