//! Periodic metric export
//!
//! A [`PeriodicReader`] collects the [`InMemoryMeter`] on a fixed interval and
//! hands each batch to every configured [`MetricExporter`]. Export failures are
//! logged and never reach the collector.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::memory::{InMemoryMeter, MetricData};
use crate::error::{TelemetryError, TelemetryResult};

/// Service name reported on every batch
pub const SERVICE_NAME: &str = "pi-coding-agent";

/// Service version reported on every batch
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Identity of the process producing metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "service.name")]
    pub service_name: String,
    #[serde(rename = "service.version")]
    pub service_version: String,
    #[serde(rename = "os.type")]
    pub os_type: String,
    #[serde(rename = "host.arch")]
    pub host_arch: String,
}

impl Resource {
    /// Resource describing this process
    pub fn detect() -> Self {
        Self {
            service_name: SERVICE_NAME.to_string(),
            service_version: SERVICE_VERSION.to_string(),
            os_type: std::env::consts::OS.to_string(),
            host_arch: std::env::consts::ARCH.to_string(),
        }
    }
}

/// Metrics collected at one instant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportBatch {
    pub exported_at: DateTime<Utc>,
    pub resource: Resource,
    pub metrics: Vec<MetricData>,
}

/// Destination for collected metrics
pub trait MetricExporter: Send + Sync {
    /// Exporter name, for diagnostics
    fn name(&self) -> &str;

    /// Deliver one batch
    fn export(&self, batch: &ExportBatch) -> TelemetryResult<()>;
}

/// Writes one JSON line per instrument
pub struct ConsoleExporter {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleExporter {
    /// Exporter writing to stdout
    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    /// Exporter writing to any sink
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

#[derive(Serialize)]
struct ConsoleLine<'a> {
    timestamp: &'a DateTime<Utc>,
    resource: &'a Resource,
    #[serde(flatten)]
    metric: &'a MetricData,
}

impl MetricExporter for ConsoleExporter {
    fn name(&self) -> &str {
        "console"
    }

    fn export(&self, batch: &ExportBatch) -> TelemetryResult<()> {
        let mut writer = self.writer.lock();
        for metric in batch.metrics.iter().filter(|m| !m.points.is_empty()) {
            let line = serde_json::to_string(&ConsoleLine {
                timestamp: &batch.exported_at,
                resource: &batch.resource,
                metric,
            })?;
            writeln!(writer, "{}", line)
                .map_err(|e| TelemetryError::export(self.name(), e.to_string()))?;
        }
        writer
            .flush()
            .map_err(|e| TelemetryError::export(self.name(), e.to_string()))
    }
}

/// Background task exporting the meter on an interval
pub struct PeriodicReader {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl PeriodicReader {
    /// Start exporting every `interval`.
    ///
    /// A zero interval disables periodic ticks; the meter is then exported only
    /// on shutdown. Must be called within a tokio runtime.
    pub fn spawn(
        meter: Arc<InMemoryMeter>,
        exporters: Vec<Arc<dyn MetricExporter>>,
        interval: Duration,
        resource: Resource,
    ) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            tracing::debug!(
                interval_ms = interval.as_millis() as u64,
                exporters = exporters.len(),
                "Periodic metric reader started"
            );

            if interval.is_zero() {
                token.cancelled().await;
            } else {
                let mut ticker = tokio::time::interval(interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                // The first tick completes immediately
                ticker.tick().await;

                loop {
                    tokio::select! {
                        _ = token.cancelled() => break,
                        _ = ticker.tick() => export_once(&meter, &exporters, &resource),
                    }
                }
            }

            // Final flush
            export_once(&meter, &exporters, &resource);
            tracing::debug!("Periodic metric reader stopped");
        });

        Self { cancel, handle }
    }

    /// Stop the reader after one last export
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(error) = self.handle.await {
            tracing::warn!(%error, "Periodic metric reader task failed");
        }
    }
}

fn export_once(meter: &InMemoryMeter, exporters: &[Arc<dyn MetricExporter>], resource: &Resource) {
    let batch = ExportBatch {
        exported_at: Utc::now(),
        resource: resource.clone(),
        metrics: meter.collect(),
    };

    for exporter in exporters {
        if let Err(error) = exporter.export(&batch) {
            tracing::warn!(exporter = exporter.name(), %error, "Metric export failed");
        }
    }
}
