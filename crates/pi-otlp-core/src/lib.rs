//! Pi OTLP Core Library
//!
//! Aggregates the coding agent's lifecycle events (sessions, turns, tool calls,
//! prompts, token usage) into counters, duration histograms and a running
//! status snapshot, and exports the instruments on an interval.

pub mod config;
pub mod error;
pub mod events;
pub mod replay;
pub mod report;
pub mod telemetry;

// Re-export commonly used types
pub use config::{ExporterKind, OtlpConfig, load_from_env};
pub use error::{TelemetryError, TelemetryResult};
pub use events::{EventDispatcher, LifecycleEvent, ModelRef, TurnMessage};
pub use replay::{ReplayEntry, parse_log, read_log, replay};
pub use report::format_status;
pub use telemetry::{
    Clock, InMemoryMeter, ManualClock, Meter, SharedTelemetryCollector, SystemClock,
    TelemetryCollector, TelemetryStatus, Usage, UsageCost, create_shared_collector,
};
