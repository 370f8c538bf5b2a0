//! CLI argument definitions using clap
//!
//! - pi-otlp replay <FILE>          # Replay an event log and print the status
//! - pi-otlp replay <FILE> --json   # Same, as JSON
//! - pi-otlp config                 # Show the configuration read from the environment

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pi-otlp")]
#[command(about = "Lifecycle telemetry for the pi coding agent")]
#[command(
    long_about = r#"Lifecycle telemetry for the pi coding agent

Aggregates session, turn, tool, prompt and token-usage events into metrics.
Export is controlled by the same variables the agent extension reads:

  PI_OTLP_ENABLE=1                 Enable collection and export
  PI_OTLP_DEBUG=1                  Verbose diagnostics
  OTEL_METRICS_EXPORTER            Comma-separated exporters (default: console)
  OTEL_EXPORTER_OTLP_ENDPOINT      OTLP endpoint
  OTEL_METRIC_EXPORT_INTERVAL      Export interval in milliseconds (default: 60000)"#
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a JSON-lines event log through the collector
    Replay {
        /// Event log, one {"at_ms": .., "event": {..}} object per line
        file: PathBuf,

        /// Print the final status as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the resolved telemetry configuration
    Config {
        /// Print the configuration as JSON
        #[arg(long)]
        json: bool,
    },
}
