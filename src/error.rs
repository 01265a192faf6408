//! Error types.
//!
//! Sink failures and state problems are surfaced to the caller; nothing on
//! the logging path panics.

use thiserror::Error;

/// Failure writing a line to a test output sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("test output write failed: {0}")]
    Io(#[from] std::io::Error),

    /// The sink no longer accepts lines (the owning test has finished).
    #[error("test output is closed")]
    Closed,
}

/// Errors returned by the logger, bridge and value snapshots.
#[derive(Debug, Error)]
pub enum LogError {
    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("semantic entry {key} has a null value")]
    NullSemanticValue { key: String },

    #[error("{type_name} does not serialize to an object (found {found})")]
    NotAnObject { type_name: String, found: &'static str },

    #[error("failed to serialize semantic value: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("invalid logger config: {0}")]
    Config(#[source] serde_json::Error),

    #[error("a global logger is already installed")]
    AlreadyInstalled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_error_converts_into_log_error() {
        let err: LogError = SinkError::Closed.into();
        assert!(matches!(err, LogError::Sink(SinkError::Closed)));
        assert_eq!(err.to_string(), "test output is closed");
    }

    #[test]
    fn test_null_semantic_value_names_key() {
        let err = LogError::NullSemanticValue {
            key: "@user".to_string(),
        };
        assert_eq!(err.to_string(), "semantic entry @user has a null value");
    }
}
