//! Telemetry collection and export
//!
//! Turns host lifecycle events into counter/histogram emissions and a running
//! status snapshot, and exports the in-memory instruments periodically.

pub mod attributes;
pub mod clock;
pub mod collector;
pub mod export;
pub mod instruments;
pub mod memory;

pub use attributes::{MetricAttributes, UsageCategory};
pub use clock::{Clock, ManualClock, SystemClock};
pub use collector::{
    CostTotals, DurationStats, DurationSummary, SessionContext, SharedTelemetryCollector,
    TelemetryCollector, TelemetryStatus, TokenTotals, Usage, UsageCost, create_shared_collector,
};
pub use export::{ConsoleExporter, ExportBatch, MetricExporter, PeriodicReader, Resource};
pub use instruments::{Counter, Histogram, Meter};
pub use memory::{HistogramData, InMemoryMeter, MetricData, MetricPoint};
