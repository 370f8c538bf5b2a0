//! Configuration display command

use anyhow::Context;
use pi_otlp_core::{OtlpConfig, load_from_env};

use crate::console::CLIConsole;

/// Show the configuration resolved from the environment
pub fn show(json: bool) -> anyhow::Result<()> {
    let config = load_from_env().context("Failed to load telemetry configuration")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&redacted(&config))?);
        return Ok(());
    }

    let console = CLIConsole::new(config.debug);
    console.print_header("Telemetry Configuration");
    console.print_field("Enabled", &config.enabled.to_string());
    console.print_field("Debug", &config.debug.to_string());
    console.print_field("Exporters", &config.exporter_names());
    console.print_field("Endpoint", &config.otlp_endpoint);
    console.print_field(
        "Headers",
        &config.otlp_headers.keys().cloned().collect::<Vec<_>>().join(", "),
    );
    console.print_field(
        "Export interval",
        &format!("{}ms", config.export_interval_ms),
    );

    if !config.enabled {
        console.warn("Telemetry is disabled; set PI_OTLP_ENABLE=1 to enable");
    }

    Ok(())
}

/// Copy of `config` with header values hidden
fn redacted(config: &OtlpConfig) -> OtlpConfig {
    let mut config = config.clone();
    for value in config.otlp_headers.values_mut() {
        *value = "***".to_string();
    }
    config
}
