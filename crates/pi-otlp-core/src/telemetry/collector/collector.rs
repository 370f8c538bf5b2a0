//! Core lifecycle telemetry collector implementation

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::super::attributes::{MetricAttributes, UNKNOWN, UsageCategory};
use super::super::clock::{Clock, SystemClock};
use super::super::instruments::{Instruments, Meter};
use super::types::{SessionContext, TelemetryStatus, Usage};

/// Aggregates host lifecycle events into metric emissions and a running status.
///
/// Every operation is synchronous and infallible. Interval tracking relies on
/// three kinds of "currently open" marker: the session start, the turn start,
/// and one start per tool name. An end event without its marker records no
/// duration and leaves the statistics untouched.
///
/// Tool starts are keyed by tool name only, so a second call of the same tool
/// before the first result replaces the first call's start time.
pub struct TelemetryCollector {
    instruments: Instruments,
    clock: Arc<dyn Clock>,

    session_id: String,
    provider: String,
    model: String,

    session_started_at: Option<u64>,
    turn_started_at: Option<u64>,
    tool_started_at: HashMap<String, u64>,

    status: TelemetryStatus,
}

impl TelemetryCollector {
    /// Create a collector that draws its instruments from `meter`
    pub fn new(meter: &dyn Meter, clock: Arc<dyn Clock>) -> Self {
        Self {
            instruments: Instruments::new(meter),
            clock,
            session_id: String::new(),
            provider: UNKNOWN.to_string(),
            model: UNKNOWN.to_string(),
            session_started_at: None,
            turn_started_at: None,
            tool_started_at: HashMap::new(),
            status: TelemetryStatus::default(),
        }
    }

    /// Create a collector timed by the real monotonic clock
    pub fn with_system_clock(meter: &dyn Meter) -> Self {
        Self::new(meter, Arc::new(SystemClock::new()))
    }

    /// Record the start of a session
    pub fn on_session_start(
        &mut self,
        session_id: &str,
        provider: Option<&str>,
        model: Option<&str>,
    ) {
        self.session_id = session_id.to_string();
        self.provider = provider.unwrap_or(UNKNOWN).to_string();
        self.model = model.unwrap_or(UNKNOWN).to_string();
        self.session_started_at = Some(self.clock.now_ms());
        self.status.sessions += 1;

        self.instruments.sessions.add(1.0, &self.base_attributes());

        tracing::debug!(
            session_id = %self.session_id,
            provider = %self.provider,
            model = %self.model,
            "Session started"
        );
    }

    /// Record the end of the current session.
    ///
    /// The session id is cleared even when no start was recorded.
    pub fn on_session_end(&mut self) {
        if let Some(started_at) = self.session_started_at.take() {
            let elapsed_ms = self.elapsed_since(started_at);
            self.instruments
                .session_duration
                .record(to_seconds(elapsed_ms), &self.base_attributes());
            self.status.durations.session.observe(elapsed_ms);

            tracing::debug!(session_id = %self.session_id, elapsed_ms, "Session ended");
        } else {
            tracing::debug!("Session end without a recorded start");
        }

        self.session_id.clear();
    }

    /// Record the start of an agent turn
    pub fn on_turn_start(&mut self) {
        self.turn_started_at = Some(self.clock.now_ms());
        self.status.turns += 1;

        self.instruments.turns.add(1.0, &self.base_attributes());
    }

    /// Record the end of the in-flight turn
    pub fn on_turn_end(&mut self) {
        let Some(started_at) = self.turn_started_at.take() else {
            tracing::debug!("Turn end without a recorded start");
            return;
        };

        let elapsed_ms = self.elapsed_since(started_at);
        self.instruments
            .turn_duration
            .record(to_seconds(elapsed_ms), &self.base_attributes());
        self.status.durations.turn.observe(elapsed_ms);

        tracing::debug!(session_id = %self.session_id, elapsed_ms, "Turn ended");
    }

    /// Record a tool invocation
    pub fn on_tool_call(&mut self, tool_name: &str) {
        let now = self.clock.now_ms();
        if self.tool_started_at.insert(tool_name.to_string(), now).is_some() {
            tracing::debug!(tool_name, "Unresolved call of the same tool replaced");
        }
        self.status.tools += 1;

        let attrs = self.base_attributes().with_tool(tool_name);
        self.instruments.tool_calls.add(1.0, &attrs);
    }

    /// Record a tool completion.
    ///
    /// The result is counted whether or not a matching call was seen.
    pub fn on_tool_result(&mut self, tool_name: &str, success: bool) {
        let attrs = self
            .base_attributes()
            .with_tool(tool_name)
            .with_success(success);

        match self.tool_started_at.remove(tool_name) {
            Some(started_at) => {
                let elapsed_ms = self.elapsed_since(started_at);
                self.instruments
                    .tool_duration
                    .record(to_seconds(elapsed_ms), &attrs);
                self.status.durations.tool.observe(elapsed_ms);

                tracing::debug!(tool_name, success, elapsed_ms, "Tool completed");
            }
            None => {
                tracing::debug!(tool_name, "Tool result without a recorded call");
            }
        }

        self.instruments.tool_results.add(1.0, &attrs);
    }

    /// Record a submitted user prompt
    pub fn on_user_prompt(&mut self, prompt_length: usize) {
        let attrs = self.base_attributes().with_prompt_length(prompt_length);
        self.instruments.prompts.add(1.0, &attrs);
        self.status.prompts += 1;
    }

    /// Apply one turn's token and cost deltas.
    ///
    /// The totals accumulate the caller's own `total_tokens` / `cost.total`;
    /// they are never recomputed from the categories.
    pub fn on_usage(&mut self, usage: &Usage) {
        let base = self.base_attributes();

        for category in UsageCategory::ALL {
            let attrs = base.clone().with_category(category);
            self.instruments
                .tokens
                .add(usage.tokens(category) as f64, &attrs);
            self.instruments
                .cost
                .add(usage.cost.amount(category), &attrs);
        }

        let tokens = &mut self.status.tokens;
        tokens.input += usage.input;
        tokens.output += usage.output;
        tokens.cache_read += usage.cache_read;
        tokens.cache_write += usage.cache_write;
        tokens.total += usage.total_tokens;

        let cost = &mut self.status.cost;
        cost.input += usage.cost.input;
        cost.output += usage.cost.output;
        cost.cache_read += usage.cost.cache_read;
        cost.cache_write += usage.cost.cache_write;
        cost.total += usage.cost.total;
    }

    /// Switch the provider/model tags without touching any count
    pub fn set_provider_model(&mut self, provider: &str, model: &str) {
        self.provider = provider.to_string();
        self.model = model.to_string();

        tracing::debug!(provider, model, "Provider/model updated");
    }

    /// Independent copy of the running status
    pub fn get_status(&self) -> TelemetryStatus {
        self.status.clone()
    }

    /// Identity currently tagged onto emissions
    pub fn current_session(&self) -> SessionContext {
        SessionContext {
            session_id: self.session_id.clone(),
            provider: self.provider.clone(),
            model: self.model.clone(),
        }
    }

    fn base_attributes(&self) -> MetricAttributes {
        MetricAttributes::session(&self.session_id, &self.provider, &self.model)
    }

    fn elapsed_since(&self, started_at: u64) -> u64 {
        self.clock.now_ms().saturating_sub(started_at)
    }
}

impl fmt::Debug for TelemetryCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelemetryCollector")
            .field("session_id", &self.session_id)
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("session_started_at", &self.session_started_at)
            .field("turn_started_at", &self.turn_started_at)
            .field("tool_started_at", &self.tool_started_at)
            .field("status", &self.status)
            .finish()
    }
}

fn to_seconds(elapsed_ms: u64) -> f64 {
    elapsed_ms as f64 / 1000.0
}
