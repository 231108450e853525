//! HTTP chart-API client
//!
//! Fetches daily and intraday OHLCV history from a Yahoo-style v8 chart
//! endpoint. Timestamps arrive as UTC epochs plus an exchange `gmtoffset`;
//! bars are converted to exchange-local naive timestamps so downstream
//! time-of-day logic (premarket cutoff, date filtering) sees the clock the
//! exchange sees.

use super::{BarSource, Interval, Period};
use crate::bars::Bar;
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

/// Chart API base URL
pub const CHART_API_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Configuration for the chart client
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Base URL for the chart API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Include premarket and after-hours prints in intraday requests
    pub include_prepost: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            base_url: CHART_API_URL.to_string(),
            timeout: Duration::from_secs(10),
            include_prepost: true,
        }
    }
}

/// Client for the chart API
pub struct ChartClient {
    config: ChartConfig,
    client: Client,
}

impl ChartClient {
    /// Create a new chart client with default configuration
    pub fn new() -> Self {
        Self::with_config(ChartConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ChartConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    async fn fetch_chart(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
    ) -> anyhow::Result<ChartResponse> {
        let url = format!("{}/{}", self.config.base_url, symbol);
        let prepost = if self.config.include_prepost {
            "true"
        } else {
            "false"
        };

        tracing::debug!(
            symbol = %symbol,
            range = %period,
            interval = interval.as_str(),
            "Fetching bars from chart API"
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("range", period.to_string().as_str()),
                ("interval", interval.as_str()),
                ("includePrePost", prepost),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Chart API error for {}: {} - {}", symbol, status, body);
        }

        Ok(response.json().await?)
    }
}

impl Default for ChartClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BarSource for ChartClient {
    async fn get_bars(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
    ) -> anyhow::Result<Vec<Bar>> {
        let response = self.fetch_chart(symbol, period, interval).await?;
        let bars = convert_to_bars(response)?;

        tracing::debug!(symbol = %symbol, bar_count = bars.len(), "Fetched bars");
        Ok(bars)
    }
}

/// Envelope returned by the chart API
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartApiError>,
}

#[derive(Debug, Deserialize)]
struct ChartApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    /// Seconds to add to a UTC epoch to get exchange-local time
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<QuoteBlock>,
}

/// Columnar OHLCV arrays; entries are null for halted/empty slots
#[derive(Debug, Deserialize)]
struct QuoteBlock {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<f64>>>,
}

/// Convert a chart response into an ordered bar series
///
/// Rows with any missing OHLCV field are dropped, matching the provider's
/// convention of nulling out halted slots.
fn convert_to_bars(response: ChartResponse) -> anyhow::Result<Vec<Bar>> {
    if let Some(error) = response.chart.error {
        anyhow::bail!("Chart API error: {} - {}", error.code, error.description);
    }

    let Some(result) = response.chart.result.and_then(|mut r| {
        if r.is_empty() {
            None
        } else {
            Some(r.remove(0))
        }
    }) else {
        return Ok(Vec::new());
    };

    let Some(timestamps) = result.timestamp else {
        return Ok(Vec::new());
    };

    let Some(quote) = result.indicators.quote.into_iter().next() else {
        return Ok(Vec::new());
    };

    let (Some(open), Some(high), Some(low), Some(close), Some(volume)) =
        (quote.open, quote.high, quote.low, quote.close, quote.volume)
    else {
        return Ok(Vec::new());
    };

    let offset = result.meta.gmtoffset;
    let mut bars = Vec::with_capacity(timestamps.len());

    for (i, epoch) in timestamps.iter().enumerate() {
        let row = (
            open.get(i).copied().flatten(),
            high.get(i).copied().flatten(),
            low.get(i).copied().flatten(),
            close.get(i).copied().flatten(),
            volume.get(i).copied().flatten(),
        );
        let (Some(o), Some(h), Some(l), Some(c), Some(v)) = row else {
            continue;
        };

        let Some(timestamp) =
            DateTime::from_timestamp(epoch + offset, 0).map(|dt| dt.naive_utc())
        else {
            continue;
        };

        let (Ok(open), Ok(high), Ok(low), Ok(close), Ok(volume)) = (
            Decimal::try_from(o),
            Decimal::try_from(h),
            Decimal::try_from(l),
            Decimal::try_from(c),
            Decimal::try_from(v),
        ) else {
            continue;
        };

        bars.push(Bar {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    Ok(bars)
}
