//! Event-log replay
//!
//! A log holds one JSON object per line: `{"at_ms": <u64>, "event": {...}}`.
//! Blank lines and lines starting with `#` are skipped. Replaying drives a
//! [`ManualClock`] from the recorded timestamps, so durations come out exactly
//! as they were logged.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{TelemetryError, TelemetryResult};
use crate::events::{EventDispatcher, LifecycleEvent};
use crate::telemetry::{ManualClock, Meter, TelemetryCollector};

/// One recorded event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayEntry {
    /// Milliseconds on the recording clock
    pub at_ms: u64,
    pub event: LifecycleEvent,
}

/// Parse a log; errors carry the 1-based line number
pub fn parse_log(input: &str) -> TelemetryResult<Vec<ReplayEntry>> {
    let mut entries = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let entry = serde_json::from_str::<ReplayEntry>(line)
            .map_err(|e| TelemetryError::invalid_event_at(index + 1, e.to_string()))?;
        entries.push(entry);
    }

    Ok(entries)
}

/// Read and parse a log file
pub fn read_log(path: impl AsRef<Path>) -> TelemetryResult<Vec<ReplayEntry>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| TelemetryError::io_at(path.display().to_string(), e.to_string()))?;
    parse_log(&content)
}

/// Feed `entries` through a fresh collector drawing instruments from `meter`
pub fn replay(entries: &[ReplayEntry], meter: &dyn Meter) -> TelemetryCollector {
    let start = entries.first().map(|e| e.at_ms).unwrap_or_default();
    let clock = ManualClock::new(start);
    let collector = TelemetryCollector::new(meter, Arc::new(clock.clone()));
    let mut dispatcher = EventDispatcher::new(collector);

    for entry in entries {
        clock.set(entry.at_ms);
        dispatcher.dispatch(&entry.event);
    }

    tracing::debug!(events = entries.len(), "Replay finished");
    dispatcher.into_collector()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::InMemoryMeter;

    const LOG: &str = r#"
# recorded session
{"at_ms": 1000, "event": {"type": "session_start", "session_id": "s1"}}
{"at_ms": 1100, "event": {"type": "turn_start"}}

{"at_ms": 1150, "event": {"type": "tool_call", "tool_name": "Read"}}
{"at_ms": 1200, "event": {"type": "tool_result", "tool_name": "Read", "is_error": false}}
{"at_ms": 3600, "event": {"type": "turn_end"}}
{"at_ms": 5000, "event": {"type": "session_shutdown"}}
"#;

    #[test]
    fn test_parse_skips_blank_and_comment_lines() {
        let entries = parse_log(LOG).unwrap();
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0].at_ms, 1000);
        assert_eq!(entries[5].event, LifecycleEvent::SessionShutdown);
    }

    #[test]
    fn test_parse_error_names_line() {
        let input = "{\"at_ms\": 0, \"event\": {\"type\": \"turn_start\"}}\n\n{\"at_ms\": 5}\n";
        let err = parse_log(input).unwrap_err();

        match err {
            TelemetryError::InvalidEvent { line, .. } => assert_eq!(line, Some(3)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_replay_uses_recorded_timestamps() {
        let meter = InMemoryMeter::new();
        let collector = replay(&parse_log(LOG).unwrap(), &meter);
        let status = collector.get_status();

        assert_eq!(status.sessions, 1);
        assert_eq!(status.turns, 1);
        assert_eq!(status.tools, 1);
        assert_eq!(status.durations.session.last_ms, 4000);
        assert_eq!(status.durations.turn.last_ms, 2500);
        assert_eq!(status.durations.tool.last_ms, 50);
        assert!(collector.current_session().session_id.is_empty());
    }

    #[test]
    fn test_replay_empty_log() {
        let meter = InMemoryMeter::new();
        let collector = replay(&[], &meter);
        assert_eq!(collector.get_status(), Default::default());
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_log("/nonexistent/pi-otlp/events.jsonl").unwrap_err();
        assert!(matches!(err, TelemetryError::Io { path: Some(_), .. }));
    }
}
