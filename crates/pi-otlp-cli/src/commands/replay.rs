//! Replay a recorded event log

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use pi_otlp_core::telemetry::{ConsoleExporter, MetricExporter, PeriodicReader, Resource};
use pi_otlp_core::{
    ExporterKind, InMemoryMeter, OtlpConfig, format_status, load_from_env, read_log, replay,
};

use crate::console::CLIConsole;

/// Replay `file`, exporting while enabled, then print the final status
pub async fn execute(file: &Path, json: bool) -> anyhow::Result<()> {
    let config = load_from_env().context("Failed to load telemetry configuration")?;
    let console = CLIConsole::new(config.debug);

    let entries = read_log(file)
        .with_context(|| format!("Failed to read event log {}", file.display()))?;
    console.info(&format!("Loaded {} events from {}", entries.len(), file.display()));

    let meter = Arc::new(InMemoryMeter::new());
    let reader = start_reader(&config, &meter, &console);

    let collector = replay(&entries, meter.as_ref());

    if let Some(reader) = reader {
        reader.shutdown().await;
    }

    let status = collector.get_status();
    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("{}", format_status(&status, &config));
    }

    Ok(())
}

fn start_reader(
    config: &OtlpConfig,
    meter: &Arc<InMemoryMeter>,
    console: &CLIConsole,
) -> Option<PeriodicReader> {
    if !config.enabled {
        console.warn("Telemetry export is disabled; set PI_OTLP_ENABLE=1 to export metrics");
        return None;
    }

    let exporters = build_exporters(config);
    if exporters.is_empty() {
        console.warn("No usable metrics exporter configured");
        return None;
    }

    Some(PeriodicReader::spawn(
        Arc::clone(meter),
        exporters,
        config.export_interval(),
        Resource::detect(),
    ))
}

fn build_exporters(config: &OtlpConfig) -> Vec<Arc<dyn MetricExporter>> {
    let mut exporters: Vec<Arc<dyn MetricExporter>> = Vec::new();

    for kind in &config.exporters {
        match kind {
            ExporterKind::Console => exporters.push(Arc::new(ConsoleExporter::stdout())),
            ExporterKind::Otlp => {
                tracing::warn!(
                    endpoint = %config.otlp_endpoint,
                    "OTLP exporter is not available in this build, skipping"
                );
            }
        }
    }

    exporters
}
