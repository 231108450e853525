//! CLI interface for gap-replay
//!
//! Provides subcommands for:
//! - `replay`: Replay top gappers for a date through the signal detector
//! - `scan`: Continuously scan the universe on an interval
//! - `status`: Show current state
//! - `config`: Show configuration

mod replay;
mod scan;

pub use replay::ReplayArgs;
pub use scan::ScanArgs;

use crate::config::Config;
use crate::replay::ReplayConfig;
use crate::signal::{DetectorConfig, SignalDetector};
use crate::source::{ChartClient, ChartConfig, Period};
use clap::{Parser, Subcommand};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "gap-replay")]
#[command(about = "Gap scanner and intraday signal replay engine for US equities")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay top gappers for a date through the signal detector
    Replay(ReplayArgs),
    /// Continuously scan the universe on an interval
    Scan(ScanArgs),
    /// Show current state
    Status,
    /// Show configuration
    Config,
}

/// Build the chart client from configuration
pub(crate) fn build_source(config: &Config) -> ChartClient {
    ChartClient::with_config(ChartConfig {
        base_url: config.source.base_url.clone(),
        timeout: Duration::from_secs(config.source.timeout_secs),
        include_prepost: config.source.include_prepost,
    })
}

/// Build the signal detector from configuration
pub(crate) fn build_detector(config: &Config) -> SignalDetector {
    SignalDetector::new(DetectorConfig {
        atr_window: config.detector.atr_window,
        wick_ratio: config.detector.wick_ratio,
        atr_stop_multiple: config.detector.atr_stop_multiple,
    })
}

/// Assemble a replay configuration
///
/// `pace` carries the base inter-event delay, or `None` to emit without
/// throttling (scan mode).
pub(crate) fn build_replay_config(
    config: &Config,
    pace: Option<Duration>,
    speed: f64,
) -> anyhow::Result<ReplayConfig> {
    Ok(ReplayConfig {
        tickers: config.scanner.tickers.clone(),
        top_n: config.scanner.top_n_gappers,
        gap_threshold_pct: config.scanner.gap_threshold_percent,
        premarket_cutoff: config.detector.premarket_cutoff()?,
        lookback: Period::days(config.source.lookback_days),
        pace,
        speed,
    })
}
