//! Scan command implementation

use super::{build_detector, build_replay_config, build_source};
use crate::config::Config;
use crate::replay::ReplayDriver;
use crate::scan::Scanner;
use crate::sink::MemorySink;
use clap::Args;
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Override the configured scan interval in seconds
    #[arg(long)]
    pub interval: Option<u64>,
}

impl ScanArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let interval_secs = self
            .interval
            .unwrap_or(config.scanner.scan_interval_seconds);
        if interval_secs == 0 {
            anyhow::bail!("Scan interval must be greater than zero");
        }

        // No pacing in scan mode; passes emit as fast as the sink accepts
        let replay_config = build_replay_config(config, None, 1.0)?;
        let sink = Arc::new(MemorySink::new());
        let driver = ReplayDriver::new(
            Arc::new(build_source(config)),
            sink,
            build_detector(config),
            replay_config,
        );
        let scanner = Scanner::new(driver, Duration::from_secs(interval_secs));

        tracing::info!(interval_secs, "Scanning until interrupted");
        tokio::select! {
            result = scanner.run() => result,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received Ctrl-C, shutting down");
                Ok(())
            }
        }
    }
}
