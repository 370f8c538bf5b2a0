//! Attribute sets attached to metric emissions

use serde::{Deserialize, Serialize};
use std::fmt;

// Attribute key constants
pub const ATTR_SESSION_ID: &str = "session.id";
pub const ATTR_PROVIDER: &str = "provider";
pub const ATTR_MODEL: &str = "model";
pub const ATTR_TOOL_NAME: &str = "tool.name";
pub const ATTR_SUCCESS: &str = "success";
pub const ATTR_USAGE_TYPE: &str = "type";
pub const ATTR_PROMPT_LENGTH: &str = "prompt.length";

/// Placeholder for a provider or model the host did not report
pub const UNKNOWN: &str = "unknown";

/// Token / cost category discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageCategory {
    Input,
    Output,
    CacheRead,
    CacheWrite,
}

impl UsageCategory {
    /// Every category, in emission order
    pub const ALL: [UsageCategory; 4] = [
        UsageCategory::Input,
        UsageCategory::Output,
        UsageCategory::CacheRead,
        UsageCategory::CacheWrite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UsageCategory::Input => "input",
            UsageCategory::Output => "output",
            UsageCategory::CacheRead => "cache_read",
            UsageCategory::CacheWrite => "cache_write",
        }
    }
}

impl fmt::Display for UsageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fixed attribute set of one metric emission.
///
/// Session id, provider and model are always present; the optional fields are
/// filled in by the event kinds that carry them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricAttributes {
    pub session_id: String,
    pub provider: String,
    pub model: String,
    pub tool_name: Option<String>,
    pub success: Option<bool>,
    pub category: Option<UsageCategory>,
    pub prompt_length: Option<usize>,
}

impl MetricAttributes {
    /// Base attribute set for the current session
    pub fn session(
        session_id: impl Into<String>,
        provider: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            provider: provider.into(),
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn with_tool(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = Some(tool_name.into());
        self
    }

    pub fn with_success(mut self, success: bool) -> Self {
        self.success = Some(success);
        self
    }

    pub fn with_category(mut self, category: UsageCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_prompt_length(mut self, prompt_length: usize) -> Self {
        self.prompt_length = Some(prompt_length);
        self
    }

    /// Render as exporter key/value pairs, base keys first
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            (ATTR_SESSION_ID, self.session_id.clone()),
            (ATTR_PROVIDER, self.provider.clone()),
            (ATTR_MODEL, self.model.clone()),
        ];
        if let Some(tool_name) = &self.tool_name {
            pairs.push((ATTR_TOOL_NAME, tool_name.clone()));
        }
        if let Some(success) = self.success {
            pairs.push((ATTR_SUCCESS, success.to_string()));
        }
        if let Some(category) = self.category {
            pairs.push((ATTR_USAGE_TYPE, category.as_str().to_string()));
        }
        if let Some(prompt_length) = self.prompt_length {
            pairs.push((ATTR_PROMPT_LENGTH, prompt_length.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_pairs() {
        let attrs = MetricAttributes::session("sess-123", "anthropic", "claude-sonnet");
        assert_eq!(
            attrs.pairs(),
            vec![
                ("session.id", "sess-123".to_string()),
                ("provider", "anthropic".to_string()),
                ("model", "claude-sonnet".to_string()),
            ]
        );
    }

    #[test]
    fn test_tool_result_pairs_render_success_as_string() {
        let attrs = MetricAttributes::session("s", UNKNOWN, UNKNOWN)
            .with_tool("Bash")
            .with_success(false);
        let pairs = attrs.pairs();
        assert!(pairs.contains(&("tool.name", "Bash".to_string())));
        assert!(pairs.contains(&("success", "false".to_string())));
    }

    #[test]
    fn test_usage_category_names() {
        let names: Vec<_> = UsageCategory::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["input", "output", "cache_read", "cache_write"]);
    }
}
