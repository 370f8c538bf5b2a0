//! Routes host lifecycle events into the collector

use super::types::{LifecycleEvent, ModelRef};
use crate::telemetry::attributes::UNKNOWN;
use crate::telemetry::{SessionContext, TelemetryCollector, TelemetryStatus};

/// Applies host events to a [`TelemetryCollector`].
///
/// Tracks the last provider/model seen on any event so that a model switch
/// reported through user input retags later emissions without opening a new
/// session.
pub struct EventDispatcher {
    collector: TelemetryCollector,
    provider: String,
    model: String,
}

impl EventDispatcher {
    pub fn new(collector: TelemetryCollector) -> Self {
        Self {
            collector,
            provider: UNKNOWN.to_string(),
            model: UNKNOWN.to_string(),
        }
    }

    /// Apply one event
    pub fn dispatch(&mut self, event: &LifecycleEvent) {
        tracing::trace!(event = event.kind(), "Dispatching lifecycle event");

        match event {
            LifecycleEvent::SessionStart { session_id, model } => {
                if let Some(model) = model {
                    self.adopt(model);
                }
                self.collector.on_session_start(
                    session_id.as_deref().unwrap_or(UNKNOWN),
                    Some(&self.provider),
                    Some(&self.model),
                );
            }
            LifecycleEvent::SessionShutdown => self.collector.on_session_end(),
            LifecycleEvent::TurnStart => self.collector.on_turn_start(),
            LifecycleEvent::TurnEnd { message } => {
                self.collector.on_turn_end();
                if let Some(usage) = message.as_ref().and_then(|m| m.assistant_usage()) {
                    self.collector.on_usage(usage);
                }
            }
            LifecycleEvent::ToolCall { tool_name } => self.collector.on_tool_call(tool_name),
            LifecycleEvent::ToolResult {
                tool_name,
                is_error,
            } => self.collector.on_tool_result(tool_name, !is_error),
            LifecycleEvent::Input { text, model } => {
                if let Some(text) = text.as_deref().filter(|t| !t.is_empty()) {
                    // Host prompt lengths are counted in UTF-16 code units
                    self.collector.on_user_prompt(text.encode_utf16().count());
                }
                let changed = model
                    .as_ref()
                    .filter(|m| m.provider != self.provider || m.id != self.model);
                if let Some(model) = changed {
                    self.adopt(model);
                    self.collector
                        .set_provider_model(&self.provider, &self.model);
                }
            }
        }
    }

    /// Apply events in order
    pub fn dispatch_all<'a>(&mut self, events: impl IntoIterator<Item = &'a LifecycleEvent>) {
        for event in events {
            self.dispatch(event);
        }
    }

    pub fn status(&self) -> TelemetryStatus {
        self.collector.get_status()
    }

    pub fn current_session(&self) -> SessionContext {
        self.collector.current_session()
    }

    pub fn collector(&self) -> &TelemetryCollector {
        &self.collector
    }

    pub fn into_collector(self) -> TelemetryCollector {
        self.collector
    }

    fn adopt(&mut self, model: &ModelRef) {
        self.provider.clone_from(&model.provider);
        self.model.clone_from(&model.id);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::events::TurnMessage;
    use crate::telemetry::attributes::MetricAttributes;
    use crate::telemetry::instruments::{PROMPT_COUNT, SESSION_COUNT, TOKEN_USAGE, TOOL_RESULT_COUNT};
    use crate::telemetry::{InMemoryMeter, ManualClock, Usage, UsageCost};

    fn dispatcher() -> (EventDispatcher, Arc<InMemoryMeter>, ManualClock) {
        let meter = Arc::new(InMemoryMeter::new());
        let clock = ManualClock::new(0);
        let collector = TelemetryCollector::new(meter.as_ref(), Arc::new(clock.clone()));
        (EventDispatcher::new(collector), meter, clock)
    }

    fn start(session_id: Option<&str>, model: Option<ModelRef>) -> LifecycleEvent {
        LifecycleEvent::SessionStart {
            session_id: session_id.map(str::to_string),
            model,
        }
    }

    fn usage() -> Usage {
        Usage {
            input: 100,
            output: 50,
            cache_read: 0,
            cache_write: 0,
            total_tokens: 150,
            cost: UsageCost {
                input: 0.001,
                output: 0.002,
                total: 0.003,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_session_start_adopts_model() {
        let (mut dispatcher, meter, _) = dispatcher();

        dispatcher.dispatch(&start(Some("s1"), Some(ModelRef::new("anthropic", "claude"))));

        let session = dispatcher.current_session();
        assert_eq!(session.session_id, "s1");
        assert_eq!(session.provider, "anthropic");
        assert_eq!(session.model, "claude");

        let sessions = meter.recording_counter(SESSION_COUNT).unwrap();
        assert_eq!(
            sessions.get(&MetricAttributes::session("s1", "anthropic", "claude")),
            1.0
        );
    }

    #[test]
    fn test_session_start_defaults() {
        let (mut dispatcher, _, _) = dispatcher();

        dispatcher.dispatch(&start(None, None));

        let session = dispatcher.current_session();
        assert_eq!(session.session_id, "unknown");
        assert_eq!(session.provider, "unknown");
        assert_eq!(session.model, "unknown");
    }

    #[test]
    fn test_session_start_keeps_previous_model() {
        let (mut dispatcher, _, _) = dispatcher();

        dispatcher.dispatch(&start(Some("s1"), Some(ModelRef::new("openai", "gpt"))));
        dispatcher.dispatch(&LifecycleEvent::SessionShutdown);
        dispatcher.dispatch(&start(Some("s2"), None));

        assert_eq!(dispatcher.current_session().provider, "openai");
        assert_eq!(dispatcher.status().sessions, 2);
    }

    #[test]
    fn test_turn_end_usage_only_for_assistant() {
        let (mut dispatcher, _, clock) = dispatcher();

        dispatcher.dispatch(&start(Some("s1"), None));
        dispatcher.dispatch(&LifecycleEvent::TurnStart);
        clock.advance(1200);
        dispatcher.dispatch(&LifecycleEvent::TurnEnd {
            message: Some(TurnMessage {
                role: "user".to_string(),
                usage: Some(usage()),
            }),
        });
        dispatcher.dispatch(&LifecycleEvent::TurnStart);
        dispatcher.dispatch(&LifecycleEvent::TurnEnd {
            message: Some(TurnMessage {
                role: "assistant".to_string(),
                usage: Some(usage()),
            }),
        });
        dispatcher.dispatch(&LifecycleEvent::TurnEnd { message: None });

        let status = dispatcher.status();
        assert_eq!(status.turns, 2);
        assert_eq!(status.durations.turn.count, 2);
        assert_eq!(status.durations.turn.total_ms, 1200);
        assert_eq!(status.tokens.total, 150);
        assert_eq!(status.cost.total, 0.003);
    }

    #[test]
    fn test_tool_result_success_is_inverted_error() {
        let (mut dispatcher, meter, _) = dispatcher();

        dispatcher.dispatch(&start(Some("s1"), None));
        dispatcher.dispatch(&LifecycleEvent::ToolCall {
            tool_name: "Bash".to_string(),
        });
        dispatcher.dispatch(&LifecycleEvent::ToolResult {
            tool_name: "Bash".to_string(),
            is_error: true,
        });

        let results = meter.recording_counter(TOOL_RESULT_COUNT).unwrap();
        let failed = MetricAttributes::session("s1", "unknown", "unknown")
            .with_tool("Bash")
            .with_success(false);
        assert_eq!(results.get(&failed), 1.0);
    }

    #[test]
    fn test_input_records_length_and_skips_empty_text() {
        let (mut dispatcher, meter, _) = dispatcher();

        dispatcher.dispatch(&start(Some("s1"), None));
        dispatcher.dispatch(&LifecycleEvent::Input {
            text: Some("héllo".to_string()),
            model: None,
        });
        dispatcher.dispatch(&LifecycleEvent::Input {
            text: Some(String::new()),
            model: None,
        });
        dispatcher.dispatch(&LifecycleEvent::Input {
            text: None,
            model: None,
        });

        assert_eq!(dispatcher.status().prompts, 1);
        let prompts = meter.recording_counter(PROMPT_COUNT).unwrap();
        let tagged = MetricAttributes::session("s1", "unknown", "unknown").with_prompt_length(5);
        assert_eq!(prompts.get(&tagged), 1.0);
    }

    #[test]
    fn test_input_length_counts_utf16_units() {
        let (mut dispatcher, meter, _) = dispatcher();

        dispatcher.dispatch(&start(Some("s1"), None));
        dispatcher.dispatch(&LifecycleEvent::Input {
            text: Some("fix 😀".to_string()),
            model: None,
        });

        let prompts = meter.recording_counter(PROMPT_COUNT).unwrap();
        let base = MetricAttributes::session("s1", "unknown", "unknown");
        assert_eq!(prompts.get(&base.clone().with_prompt_length(6)), 1.0);
        assert_eq!(prompts.get(&base.with_prompt_length(5)), 0.0);
    }

    #[test]
    fn test_input_model_switch_retags_without_new_session() {
        let (mut dispatcher, meter, _) = dispatcher();

        dispatcher.dispatch(&start(Some("s1"), Some(ModelRef::new("anthropic", "claude"))));
        dispatcher.dispatch(&LifecycleEvent::Input {
            text: None,
            model: Some(ModelRef::new("openai", "gpt")),
        });
        dispatcher.dispatch(&LifecycleEvent::TurnStart);
        dispatcher.dispatch(&LifecycleEvent::TurnEnd {
            message: Some(TurnMessage {
                role: "assistant".to_string(),
                usage: Some(usage()),
            }),
        });

        let session = dispatcher.current_session();
        assert_eq!(session.session_id, "s1");
        assert_eq!(session.provider, "openai");
        assert_eq!(session.model, "gpt");
        assert_eq!(dispatcher.status().sessions, 1);

        let tokens = meter.recording_counter(TOKEN_USAGE).unwrap();
        let input = MetricAttributes::session("s1", "openai", "gpt")
            .with_category(crate::telemetry::UsageCategory::Input);
        assert_eq!(tokens.get(&input), 100.0);
    }

    #[test]
    fn test_dispatch_all_in_order() {
        let (mut dispatcher, _, clock) = dispatcher();
        let events = vec![
            start(Some("s1"), None),
            LifecycleEvent::ToolCall {
                tool_name: "Read".to_string(),
            },
        ];

        dispatcher.dispatch_all(&events);
        clock.advance(40);
        dispatcher.dispatch(&LifecycleEvent::ToolResult {
            tool_name: "Read".to_string(),
            is_error: false,
        });

        let collector = dispatcher.into_collector();
        assert_eq!(collector.get_status().durations.tool.last_ms, 40);
    }
}
