//! Host lifecycle event types

use serde::{Deserialize, Serialize};

use crate::telemetry::Usage;

/// Model selected in the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRef {
    pub provider: String,
    pub id: String,
}

impl ModelRef {
    pub fn new(provider: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            id: id.into(),
        }
    }
}

/// Message that closed a turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnMessage {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl TurnMessage {
    /// Usage carried by an assistant message, if any
    pub fn assistant_usage(&self) -> Option<&Usage> {
        if self.role == "assistant" {
            self.usage.as_ref()
        } else {
            None
        }
    }
}

/// Lifecycle event emitted by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LifecycleEvent {
    SessionStart {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        session_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        model: Option<ModelRef>,
    },
    SessionShutdown,
    TurnStart,
    TurnEnd {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<TurnMessage>,
    },
    ToolCall {
        tool_name: String,
    },
    ToolResult {
        tool_name: String,
        #[serde(default)]
        is_error: bool,
    },
    Input {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        model: Option<ModelRef>,
    },
}

impl LifecycleEvent {
    /// Wire name of the event kind
    pub fn kind(&self) -> &'static str {
        match self {
            LifecycleEvent::SessionStart { .. } => "session_start",
            LifecycleEvent::SessionShutdown => "session_shutdown",
            LifecycleEvent::TurnStart => "turn_start",
            LifecycleEvent::TurnEnd { .. } => "turn_end",
            LifecycleEvent::ToolCall { .. } => "tool_call",
            LifecycleEvent::ToolResult { .. } => "tool_result",
            LifecycleEvent::Input { .. } => "input",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_session_start() {
        let event: LifecycleEvent = serde_json::from_str(
            r#"{"type":"session_start","session_id":"s1","model":{"provider":"anthropic","id":"claude"}}"#,
        )
        .unwrap();

        assert_eq!(
            event,
            LifecycleEvent::SessionStart {
                session_id: Some("s1".to_string()),
                model: Some(ModelRef::new("anthropic", "claude")),
            }
        );
        assert_eq!(event.kind(), "session_start");
    }

    #[test]
    fn test_optional_fields_default() {
        let event: LifecycleEvent = serde_json::from_str(r#"{"type":"session_start"}"#).unwrap();
        assert_eq!(
            event,
            LifecycleEvent::SessionStart {
                session_id: None,
                model: None
            }
        );

        let event: LifecycleEvent =
            serde_json::from_str(r#"{"type":"tool_result","tool_name":"Read"}"#).unwrap();
        assert!(matches!(event, LifecycleEvent::ToolResult { is_error: false, .. }));
    }

    #[test]
    fn test_turn_end_usage_is_camel_case() {
        let event: LifecycleEvent = serde_json::from_str(
            r#"{"type":"turn_end","message":{"role":"assistant","usage":{
                "input":100,"output":50,"cacheRead":10,"cacheWrite":5,"totalTokens":165,
                "cost":{"input":0.001,"output":0.002,"cacheRead":0.0001,"cacheWrite":0.0002,"total":0.0033}
            }}}"#,
        )
        .unwrap();

        let LifecycleEvent::TurnEnd { message: Some(message) } = event else {
            panic!("expected turn_end with message");
        };
        let usage = message.assistant_usage().unwrap();
        assert_eq!(usage.cache_read, 10);
        assert_eq!(usage.total_tokens, 165);
        assert_eq!(usage.cost.cache_write, 0.0002);
    }

    #[test]
    fn test_non_assistant_usage_ignored() {
        let message = TurnMessage {
            role: "user".to_string(),
            usage: Some(Usage::default()),
        };
        assert!(message.assistant_usage().is_none());
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(serde_json::from_str::<LifecycleEvent>(r#"{"type":"agent_end"}"#).is_err());
        assert!(serde_json::from_str::<LifecycleEvent>(r#"{"type":"tool_call"}"#).is_err());
    }
}
