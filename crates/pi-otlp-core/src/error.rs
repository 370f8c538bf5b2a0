//! Error types for pi-otlp
//!
//! The aggregation engine itself never fails: every "end without start" case is a
//! defined no-op. Errors only surface from the fallible edges of the crate:
//! configuration loading, event-log parsing and metric export.

use thiserror::Error;

/// Result type alias for pi-otlp operations
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Main error type for pi-otlp
#[derive(Error, Debug, Clone)]
pub enum TelemetryError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// A lifecycle event could not be decoded
    #[error("Invalid event: {message}")]
    InvalidEvent {
        message: String,
        line: Option<usize>,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json { message: String },

    /// Metric export errors
    #[error("Export error: {exporter}: {message}")]
    Export { exporter: String, message: String },
}

impl TelemetryError {
    /// Create a configuration error with context
    pub fn config_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create an invalid event error pointing at a line of an event log
    pub fn invalid_event_at(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidEvent {
            message: message.into(),
            line: Some(line),
        }
    }

    /// Create an IO error for a path
    pub fn io_at(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Create an export error
    pub fn export(exporter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Export {
            exporter: exporter.into(),
            message: message.into(),
        }
    }

    /// Short machine-readable code for the error kind
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "PI_OTLP_CONFIG",
            Self::InvalidEvent { .. } => "PI_OTLP_INVALID_EVENT",
            Self::Io { .. } => "PI_OTLP_IO",
            Self::Json { .. } => "PI_OTLP_JSON",
            Self::Export { .. } => "PI_OTLP_EXPORT",
        }
    }

    /// Additional context, when the error carries any
    pub fn context(&self) -> Option<String> {
        match self {
            Self::Config { context, .. } => context.clone(),
            Self::InvalidEvent { line, .. } => line.map(|l| format!("line {}", l)),
            Self::Io { path, .. } => path.clone(),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TelemetryError {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
            path: None,
        }
    }
}

impl From<serde_json::Error> for TelemetryError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: error.to_string(),
        }
    }
}
