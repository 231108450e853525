//! Configuration types for gap-replay

use crate::telemetry::LogFormat;
use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scanner: ScannerConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub detector: DetectorSettings,
    #[serde(default)]
    pub replay: ReplaySettings,
    pub telemetry: TelemetryConfig,
}

/// Scanner universe and selection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScannerConfig {
    /// Symbols to scan
    #[serde(default = "default_tickers")]
    pub tickers: Vec<String>,

    /// Keep at most this many ranked gappers
    #[serde(default = "default_top_n")]
    pub top_n_gappers: usize,

    /// Minimum gap percentage to retain a candidate
    #[serde(default = "default_gap_threshold")]
    pub gap_threshold_percent: Decimal,

    /// Seconds between live scan passes
    #[serde(default = "default_scan_interval")]
    pub scan_interval_seconds: u64,
}

fn default_tickers() -> Vec<String> {
    ["AAPL", "TSLA", "AMD", "NVDA", "MSFT"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_top_n() -> usize {
    10
}
fn default_gap_threshold() -> Decimal {
    Decimal::new(1, 1) // 0.1%
}
fn default_scan_interval() -> u64 {
    10
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            tickers: default_tickers(),
            top_n_gappers: 10,
            gap_threshold_percent: Decimal::new(1, 1),
            scan_interval_seconds: 10,
        }
    }
}

/// Bar source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Chart API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Include premarket and after-hours prints in intraday fetches
    #[serde(default = "default_true")]
    pub include_prepost: bool,

    /// Calendar days of history per fetch
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
}

fn default_base_url() -> String {
    crate::source::CHART_API_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_true() -> bool {
    true
}
fn default_lookback_days() -> u32 {
    10
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: 10,
            include_prepost: true,
            lookback_days: 10,
        }
    }
}

/// Signal detector thresholds
#[derive(Debug, Clone, Deserialize)]
pub struct DetectorSettings {
    /// Trailing window for the ATR stop
    #[serde(default = "default_atr_window")]
    pub atr_window: usize,

    /// Minimum upper-wick share of the bar range for a long-wick exit
    #[serde(default = "default_wick_ratio")]
    pub wick_ratio: Decimal,

    /// ATR multiple below entry that triggers the stop
    #[serde(default = "default_atr_stop_multiple")]
    pub atr_stop_multiple: Decimal,

    /// Regular-session open hour (exchange-local)
    #[serde(default = "default_open_hour")]
    pub market_open_hour: u32,

    /// Regular-session open minute (exchange-local)
    #[serde(default = "default_open_minute")]
    pub market_open_minute: u32,
}

fn default_atr_window() -> usize {
    14
}
fn default_wick_ratio() -> Decimal {
    Decimal::new(6, 1) // 0.6
}
fn default_atr_stop_multiple() -> Decimal {
    Decimal::new(15, 1) // 1.5
}
fn default_open_hour() -> u32 {
    9
}
fn default_open_minute() -> u32 {
    30
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            atr_window: 14,
            wick_ratio: Decimal::new(6, 1),
            atr_stop_multiple: Decimal::new(15, 1),
            market_open_hour: 9,
            market_open_minute: 30,
        }
    }
}

impl DetectorSettings {
    /// Premarket cutoff as a time of day
    pub fn premarket_cutoff(&self) -> anyhow::Result<NaiveTime> {
        NaiveTime::from_hms_opt(self.market_open_hour, self.market_open_minute, 0).ok_or_else(
            || {
                anyhow::anyhow!(
                    "Invalid market open time {:02}:{:02}",
                    self.market_open_hour,
                    self.market_open_minute
                )
            },
        )
    }
}

/// Replay pacing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaySettings {
    /// Base delay between emitted events in milliseconds
    #[serde(default = "default_pace_ms")]
    pub pace_ms: u64,
}

fn default_pace_ms() -> u64 {
    200
}

impl Default for ReplaySettings {
    fn default() -> Self {
        Self { pace_ms: 200 }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    pub metrics_port: u16,
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            [scanner]
            tickers = ["AAPL", "TSLA"]
            top_n_gappers = 5
            gap_threshold_percent = 2.5
            scan_interval_seconds = 30

            [source]
            base_url = "https://chart.example.com"
            timeout_secs = 8
            include_prepost = true
            lookback_days = 10

            [detector]
            atr_window = 14
            wick_ratio = 0.6
            atr_stop_multiple = 1.5
            market_open_hour = 9
            market_open_minute = 30

            [replay]
            pace_ms = 200

            [telemetry]
            metrics_port = 9090
            log_level = "info"
            otlp_endpoint = "http://localhost:4317"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.scanner.tickers, vec!["AAPL", "TSLA"]);
        assert_eq!(config.scanner.top_n_gappers, 5);
        assert_eq!(config.scanner.gap_threshold_percent, dec!(2.5));
        assert_eq!(config.source.timeout_secs, 8);
        assert_eq!(config.replay.pace_ms, 200);
    }

    #[test]
    fn test_config_defaults_fill_missing_sections() {
        let toml = r#"
            [telemetry]
            metrics_port = 9090
            log_level = "info"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.scanner.tickers.len(), 5);
        assert_eq!(config.scanner.top_n_gappers, 10);
        assert_eq!(config.scanner.gap_threshold_percent, dec!(0.1));
        assert_eq!(config.scanner.scan_interval_seconds, 10);
        assert_eq!(config.detector.atr_window, 14);
        assert_eq!(config.detector.wick_ratio, dec!(0.6));
        assert!(config.source.include_prepost);
        assert!(config.telemetry.otlp_endpoint.is_none());
    }

    #[test]
    fn test_premarket_cutoff() {
        let settings = DetectorSettings::default();
        let cutoff = settings.premarket_cutoff().unwrap();
        assert_eq!(cutoff, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
    }

    #[test]
    fn test_premarket_cutoff_invalid() {
        let settings = DetectorSettings {
            market_open_hour: 25,
            ..Default::default()
        };
        assert!(settings.premarket_cutoff().is_err());
    }

    #[test]
    fn test_config_load_nonexistent() {
        let result = Config::load("/nonexistent/path/config.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_scanner_config_clone() {
        let config = ScannerConfig::default();
        let cloned = config.clone();
        assert_eq!(config.tickers, cloned.tickers);
    }
}
