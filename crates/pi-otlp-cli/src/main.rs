//! Pi OTLP CLI application
//!
//! Replays recorded agent lifecycle events through the telemetry collector and
//! inspects the telemetry configuration.
//!
//! # Installation
//!
//! ```bash
//! cargo install --path crates/pi-otlp-cli
//! ```
//!
//! # Commands
//!
//! - `pi-otlp replay <FILE>`: feed a JSON-lines event log through the
//!   collector, exporting on the configured interval when enabled, and print
//!   the final status. `--json` prints the status as JSON instead.
//! - `pi-otlp config`: print the configuration read from the environment.

mod args;
mod commands;
mod console;
mod router;

use args::Cli;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG wins; otherwise PI_OTLP_DEBUG=1 turns on debug output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if std::env::var("PI_OTLP_DEBUG").as_deref() == Ok("1") {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    router::route(cli).await
}
