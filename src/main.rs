use clap::Parser;
use gap_replay::cli::{Cli, Commands};
use gap_replay::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).expect("Invalid default config")
    });

    // Initialize telemetry
    gap_replay::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Replay(args) => {
            tracing::info!("Starting replay");
            args.execute(&config).await?;
        }
        Commands::Scan(args) => {
            tracing::info!("Starting live scan");
            args.execute(&config).await?;
        }
        Commands::Status => {
            println!("gap-replay status");
            println!("  Mode: Scanner idle");
            println!("  Status: Not running");
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Tickers: {}", config.scanner.tickers.join(", "));
            println!(
                "  Selection: top {} gappers at >= {}%",
                config.scanner.top_n_gappers, config.scanner.gap_threshold_percent
            );
            println!("  Scan interval: {}s", config.scanner.scan_interval_seconds);
            println!("  Source: {}", config.source.base_url);
            println!(
                "  Detector: ATR window {}, wick ratio {}, stop {}x ATR",
                config.detector.atr_window,
                config.detector.wick_ratio,
                config.detector.atr_stop_multiple
            );
        }
    }

    Ok(())
}
