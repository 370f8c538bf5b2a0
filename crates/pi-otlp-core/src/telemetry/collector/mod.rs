//! Lifecycle telemetry collector

mod collector;
mod types;

pub use collector::TelemetryCollector;
pub use types::{
    CostTotals, DurationStats, DurationSummary, SessionContext, SharedTelemetryCollector,
    TelemetryStatus, TokenTotals, Usage, UsageCost, create_shared_collector,
};
