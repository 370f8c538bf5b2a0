//! Types and type aliases for lifecycle telemetry collection

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::TelemetryCollector;
use super::super::attributes::UsageCategory;
use super::super::clock::Clock;
use super::super::instruments::Meter;

/// Token deltas reported for one turn
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub input: u64,
    pub output: u64,
    pub cache_read: u64,
    pub cache_write: u64,
    /// Caller-supplied total; not checked against the categories
    pub total_tokens: u64,
    pub cost: UsageCost,
}

impl Usage {
    /// Token delta for one category
    pub fn tokens(&self, category: UsageCategory) -> u64 {
        match category {
            UsageCategory::Input => self.input,
            UsageCategory::Output => self.output,
            UsageCategory::CacheRead => self.cache_read,
            UsageCategory::CacheWrite => self.cache_write,
        }
    }
}

/// Cost deltas reported for one turn, in USD
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageCost {
    pub input: f64,
    pub output: f64,
    pub cache_read: f64,
    pub cache_write: f64,
    pub total: f64,
}

impl UsageCost {
    /// Cost delta for one category
    pub fn amount(&self, category: UsageCategory) -> f64 {
        match category {
            UsageCategory::Input => self.input,
            UsageCategory::Output => self.output,
            UsageCategory::CacheRead => self.cache_read,
            UsageCategory::CacheWrite => self.cache_write,
        }
    }
}

/// Running token totals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTotals {
    pub input: u64,
    pub output: u64,
    pub cache_read: u64,
    pub cache_write: u64,
    pub total: u64,
}

/// Running cost totals, in USD
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostTotals {
    pub input: f64,
    pub output: f64,
    pub cache_read: f64,
    pub cache_write: f64,
    pub total: f64,
}

/// Statistics over completed intervals of one kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationStats {
    /// Number of completed intervals
    pub count: u64,
    /// Sum of elapsed milliseconds
    pub total_ms: u64,
    /// Elapsed milliseconds of the most recent interval
    pub last_ms: u64,
}

impl DurationStats {
    pub(crate) fn observe(&mut self, elapsed_ms: u64) {
        self.count += 1;
        self.total_ms += elapsed_ms;
        self.last_ms = elapsed_ms;
    }

    /// Rounded mean interval, 0 when nothing completed yet
    pub fn average_ms(&self) -> u64 {
        if self.count == 0 {
            0
        } else {
            (self.total_ms as f64 / self.count as f64).round() as u64
        }
    }
}

/// Duration statistics per interval kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationSummary {
    pub session: DurationStats,
    pub turn: DurationStats,
    pub tool: DurationStats,
}

/// Point-in-time snapshot of the running status.
///
/// Owned by value: later collector activity never shows through a snapshot
/// that was already handed out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetryStatus {
    pub sessions: u64,
    pub turns: u64,
    pub tools: u64,
    pub prompts: u64,
    pub tokens: TokenTotals,
    pub cost: CostTotals,
    pub durations: DurationSummary,
}

/// Identity of the session currently being tagged onto emissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// Empty when no session is active
    pub session_id: String,
    pub provider: String,
    pub model: String,
}

/// Collector shared between threads; every event is applied under the one lock
pub type SharedTelemetryCollector = Arc<Mutex<TelemetryCollector>>;

/// Create a shared telemetry collector
pub fn create_shared_collector(
    meter: &dyn Meter,
    clock: Arc<dyn Clock>,
) -> SharedTelemetryCollector {
    Arc::new(Mutex::new(TelemetryCollector::new(meter, clock)))
}
