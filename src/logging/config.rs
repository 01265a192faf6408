//! Logger configuration.

use serde::Deserialize;

use crate::error::LogError;

use super::scope::ScopeFormat;

pub const DEFAULT_SEMANTIC_MARKER: char = '@';
pub const DEFAULT_SEMANTIC_HEADER: &str = "Values that may be sent to a value store:";

/// Formatting options shared by every logger of a provider or bridge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Leading character that marks a state entry as semantic.
    pub semantic_marker: char,
    /// Line written before the semantic field dump.
    pub semantic_header: String,
    pub scope_format: ScopeFormat,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            semantic_marker: DEFAULT_SEMANTIC_MARKER,
            semantic_header: DEFAULT_SEMANTIC_HEADER.to_string(),
            scope_format: ScopeFormat::default(),
        }
    }
}

impl LoggerConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, LogError> {
        serde_json::from_str(json).map_err(LogError::Config)
    }

    pub fn with_scope_format(mut self, scope_format: ScopeFormat) -> Self {
        self.scope_format = scope_format;
        self
    }

    pub fn with_semantic_marker(mut self, marker: char) -> Self {
        self.semantic_marker = marker;
        self
    }

    pub fn with_semantic_header(mut self, header: impl Into<String>) -> Self {
        self.semantic_header = header.into();
        self
    }
}
