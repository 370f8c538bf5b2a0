//! Command routing logic for CLI

use crate::args::{Cli, Commands};
use crate::commands;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Replay { file, json } => commands::replay::execute(&file, json).await,
        Commands::Config { json } => commands::config::show(json),
    }
}
