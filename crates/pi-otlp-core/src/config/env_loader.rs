//! Environment variable-based configuration loading

use std::collections::BTreeMap;
use std::env;

use super::{DEFAULT_EXPORT_INTERVAL_MS, DEFAULT_OTLP_ENDPOINT, ExporterKind, OtlpConfig};
use crate::error::{TelemetryError, TelemetryResult};

pub const ENV_ENABLE: &str = "PI_OTLP_ENABLE";
pub const ENV_DEBUG: &str = "PI_OTLP_DEBUG";
pub const ENV_METRICS_EXPORTER: &str = "OTEL_METRICS_EXPORTER";
pub const ENV_METRICS_ENDPOINT: &str = "OTEL_EXPORTER_OTLP_METRICS_ENDPOINT";
pub const ENV_ENDPOINT: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";
pub const ENV_HEADERS: &str = "OTEL_EXPORTER_OTLP_HEADERS";
pub const ENV_EXPORT_INTERVAL: &str = "OTEL_METRIC_EXPORT_INTERVAL";

/// Load configuration from the process environment
pub fn load_from_env() -> TelemetryResult<OtlpConfig> {
    load_from_lookup(|key| env::var(key).ok())
}

/// Load configuration from any variable lookup
///
/// Flags are on only for the exact value `"1"`. The metrics endpoint falls back
/// to the generic OTLP endpoint and then to the local collector default.
pub fn load_from_lookup<F>(lookup: F) -> TelemetryResult<OtlpConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let enabled = lookup(ENV_ENABLE).as_deref() == Some("1");
    let debug = lookup(ENV_DEBUG).as_deref() == Some("1");

    let exporters = parse_exporters(
        &lookup(ENV_METRICS_EXPORTER).unwrap_or_else(|| ExporterKind::Console.to_string()),
    );

    let otlp_endpoint = lookup(ENV_METRICS_ENDPOINT)
        .or_else(|| lookup(ENV_ENDPOINT))
        .unwrap_or_else(|| DEFAULT_OTLP_ENDPOINT.to_string());

    let otlp_headers = parse_headers(&lookup(ENV_HEADERS).unwrap_or_default());

    let export_interval_ms = match lookup(ENV_EXPORT_INTERVAL) {
        Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
            TelemetryError::config_with_context(
                format!("Invalid {} value", ENV_EXPORT_INTERVAL),
                format!("Expected a non-negative number of milliseconds, got '{}'", raw),
            )
        })?,
        None => DEFAULT_EXPORT_INTERVAL_MS,
    };

    Ok(OtlpConfig {
        enabled,
        debug,
        exporters,
        otlp_endpoint,
        otlp_headers,
        export_interval_ms,
    })
}

/// Parse a comma-separated exporter list, skipping unknown names
pub fn parse_exporters(raw: &str) -> Vec<ExporterKind> {
    let mut exporters = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        let kind = match name {
            "console" => ExporterKind::Console,
            "otlp" => ExporterKind::Otlp,
            other => {
                tracing::warn!(exporter = other, "Skipping unknown metrics exporter");
                continue;
            }
        };
        if !exporters.contains(&kind) {
            exporters.push(kind);
        }
    }
    exporters
}

/// Parse `key=value` pairs separated by commas.
///
/// Keys and values are trimmed, values may themselves contain `=`, and entries
/// without `=` or with an empty key are skipped.
pub fn parse_headers(raw: &str) -> BTreeMap<String, String> {
    raw.split(',')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), value.trim().to_string()))
        })
        .collect()
}
