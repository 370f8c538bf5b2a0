//! Metric instrument interfaces
//!
//! The collector does not know which metrics backend it feeds. It asks a
//! [`Meter`] for named counters and histograms once, at construction, and then
//! only ever calls `add` / `record` on them.

use std::sync::Arc;

use super::attributes::MetricAttributes;

// Instrument names
pub const SESSION_COUNT: &str = "pi.session.count";
pub const TURN_COUNT: &str = "pi.turn.count";
pub const TOOL_CALL_COUNT: &str = "pi.tool_call.count";
pub const TOOL_RESULT_COUNT: &str = "pi.tool_result.count";
pub const PROMPT_COUNT: &str = "pi.prompt.count";
pub const TOKEN_USAGE: &str = "pi.token.usage";
pub const COST_USAGE: &str = "pi.cost.usage";
pub const SESSION_DURATION: &str = "pi.session.duration";
pub const TURN_DURATION: &str = "pi.turn.duration";
pub const TOOL_DURATION: &str = "pi.tool.duration";

/// Monotonically increasing instrument, fed deltas
#[cfg_attr(test, mockall::automock)]
pub trait Counter: Send + Sync {
    fn add(&self, value: f64, attributes: &MetricAttributes);
}

/// Distribution instrument
#[cfg_attr(test, mockall::automock)]
pub trait Histogram: Send + Sync {
    fn record(&self, value: f64, attributes: &MetricAttributes);
}

/// Instrument factory
#[cfg_attr(test, mockall::automock)]
pub trait Meter: Send + Sync {
    fn counter(&self, name: &str, description: &str, unit: &str) -> Arc<dyn Counter>;

    fn histogram(&self, name: &str, description: &str, unit: &str) -> Arc<dyn Histogram>;
}

/// The full instrument set used by the collector
pub(crate) struct Instruments {
    pub(crate) sessions: Arc<dyn Counter>,
    pub(crate) turns: Arc<dyn Counter>,
    pub(crate) tool_calls: Arc<dyn Counter>,
    pub(crate) tool_results: Arc<dyn Counter>,
    pub(crate) prompts: Arc<dyn Counter>,
    pub(crate) tokens: Arc<dyn Counter>,
    pub(crate) cost: Arc<dyn Counter>,
    pub(crate) session_duration: Arc<dyn Histogram>,
    pub(crate) turn_duration: Arc<dyn Histogram>,
    pub(crate) tool_duration: Arc<dyn Histogram>,
}

impl Instruments {
    pub(crate) fn new(meter: &dyn Meter) -> Self {
        Self {
            sessions: meter.counter(SESSION_COUNT, "Count of pi coding sessions started", "1"),
            turns: meter.counter(TURN_COUNT, "Count of agent turns (tool-calling loops)", "1"),
            tool_calls: meter.counter(TOOL_CALL_COUNT, "Count of tool invocations", "1"),
            tool_results: meter.counter(TOOL_RESULT_COUNT, "Count of tool completions", "1"),
            prompts: meter.counter(PROMPT_COUNT, "Count of user prompts submitted", "1"),
            tokens: meter.counter(TOKEN_USAGE, "Tokens used, by type", "tokens"),
            cost: meter.counter(COST_USAGE, "Cost incurred, by type", "USD"),
            session_duration: meter.histogram(SESSION_DURATION, "Duration of sessions", "s"),
            turn_duration: meter.histogram(TURN_DURATION, "Duration of agent turns", "s"),
            tool_duration: meter.histogram(TOOL_DURATION, "Duration of tool executions", "s"),
        }
    }
}
