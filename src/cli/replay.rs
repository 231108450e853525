//! Replay command implementation

use super::{build_detector, build_replay_config, build_source};
use crate::config::Config;
use crate::replay::ReplayDriver;
use crate::sink::MemorySink;
use crate::telemetry::{set_gauge, GaugeMetric};
use chrono::NaiveDate;
use clap::Args;
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Replay date in YYYY-MM-DD (exchange-local); defaults to the most
    /// recent trading day
    #[arg(long)]
    pub date: Option<String>,

    /// Replay speed multiplier (> 1.0 slows playback by that factor)
    #[arg(long, default_value = "1.0")]
    pub speed: f64,
}

impl ReplayArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        // Argument validation happens before any fetch is attempted
        let target = self.date.as_deref().map(parse_date).transpose()?;
        if self.speed <= 0.0 {
            anyhow::bail!("Speed must be greater than zero, got {}", self.speed);
        }

        let pace = Duration::from_millis(config.replay.pace_ms);
        let replay_config = build_replay_config(config, Some(pace), self.speed)?;
        let sink = Arc::new(MemorySink::new());
        let driver = ReplayDriver::new(
            Arc::new(build_source(config)),
            sink.clone(),
            build_detector(config),
            replay_config,
        );

        let summary = driver.run(target).await?;
        set_gauge(GaugeMetric::InPlaySymbols, sink.len().await as f64);

        println!(
            "Replay complete: {} candidates, {} replayed, {} events, {} skipped",
            summary.candidates,
            summary.symbols_replayed,
            summary.events_emitted,
            summary.symbols_skipped
        );

        let symbols = sink.symbols().await;
        if symbols.is_empty() {
            println!("No in-play symbols.");
            return Ok(());
        }

        println!("In-play symbols:");
        for symbol in symbols {
            if let Some(event) = sink.latest(&symbol).await {
                println!(
                    "  {}  {}  price={}  at={}",
                    symbol,
                    event.label(),
                    event.price,
                    event.timestamp
                );
            }
        }

        Ok(())
    }
}

/// Parse a YYYY-MM-DD date argument
fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Date must be in YYYY-MM-DD format, got '{}'", s))
}
