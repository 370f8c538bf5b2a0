//! Telemetry configuration

mod env_loader;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

pub use env_loader::{load_from_env, load_from_lookup, parse_exporters, parse_headers};

/// Default OTLP metrics endpoint
pub const DEFAULT_OTLP_ENDPOINT: &str = "http://localhost:4318/v1/metrics";

/// Default export interval in milliseconds
pub const DEFAULT_EXPORT_INTERVAL_MS: u64 = 60_000;

/// Metric exporter selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExporterKind {
    Console,
    Otlp,
}

impl ExporterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExporterKind::Console => "console",
            ExporterKind::Otlp => "otlp",
        }
    }
}

impl fmt::Display for ExporterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved telemetry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtlpConfig {
    /// Telemetry is collected and exported only when enabled
    pub enabled: bool,
    /// Verbose diagnostics
    pub debug: bool,
    /// Exporters, in the order given
    pub exporters: Vec<ExporterKind>,
    /// OTLP metrics endpoint
    pub otlp_endpoint: String,
    /// Extra headers for OTLP requests
    pub otlp_headers: BTreeMap<String, String>,
    /// Interval between periodic exports
    pub export_interval_ms: u64,
}

impl Default for OtlpConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            debug: false,
            exporters: vec![ExporterKind::Console],
            otlp_endpoint: DEFAULT_OTLP_ENDPOINT.to_string(),
            otlp_headers: BTreeMap::new(),
            export_interval_ms: DEFAULT_EXPORT_INTERVAL_MS,
        }
    }
}

impl OtlpConfig {
    /// Export interval as a duration
    pub fn export_interval(&self) -> Duration {
        Duration::from_millis(self.export_interval_ms)
    }

    /// Whether `kind` is among the configured exporters
    pub fn has_exporter(&self, kind: ExporterKind) -> bool {
        self.exporters.contains(&kind)
    }

    /// Exporter names joined for display
    pub fn exporter_names(&self) -> String {
        self.exporters
            .iter()
            .map(ExporterKind::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
