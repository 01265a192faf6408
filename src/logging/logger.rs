//! The test logger.
//!
//! Formats each record as one line, `"<scope>: <category> [<event>] <message>"`
//! (scope part omitted when no scope is active), then optionally the error
//! text and the semantic field dump, all written to the injected sink.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::error::LogError;
use crate::output::TestOutput;

use super::config::LoggerConfig;
use super::level::{EventId, LogLevel};
use super::scope::{ScopeGuard, ScopeStack};
use super::structured::{LogState, StateEntry};

/// Formatter that renders a state through its `Display` impl.
pub fn display_formatter<S: fmt::Display + ?Sized>(
    state: &S,
    _error: Option<&(dyn Error + 'static)>,
) -> String {
    state.to_string()
}

/// Full text of an error: its message followed by its `source()` chain.
pub fn error_text(error: &(dyn Error + 'static)) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str("\n  caused by: ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

/// Writes one already-formatted record to `sink`.
///
/// Shared by [`TestLogger`] and the `log` bridge.
#[allow(clippy::too_many_arguments)]
pub(crate) fn write_record(
    sink: &dyn TestOutput,
    config: &LoggerConfig,
    scope: Option<&str>,
    category: &str,
    event_id: &EventId,
    message: &str,
    error: Option<&(dyn Error + 'static)>,
    entries: Option<&[StateEntry]>,
) -> Result<(), LogError> {
    let line = match scope {
        Some(scope) => format!("{}: {} [{}] {}", scope, category, event_id, message),
        None => format!("{} [{}] {}", category, event_id, message),
    };
    sink.write_line(&line)?;

    if let Some(error) = error {
        sink.write_line(&error_text(error))?;
    }

    let Some(entries) = entries else {
        return Ok(());
    };
    let semantic: Vec<&StateEntry> = entries
        .iter()
        .filter(|entry| entry.is_semantic(config.semantic_marker))
        .collect();
    if semantic.is_empty() {
        return Ok(());
    }

    sink.write_line(&config.semantic_header)?;
    for entry in semantic {
        let fields = entry
            .value
            .reported_fields()
            .ok_or_else(|| LogError::NullSemanticValue {
                key: entry.key.clone(),
            })?;
        for field in fields {
            sink.write_line(&field.to_string())?;
        }
    }
    Ok(())
}

/// Logger for one category, writing into a test output sink.
///
/// ```
/// use std::sync::Arc;
/// use scoped_test_log::logging::{EventId, LogLevel, TestLogger};
/// use scoped_test_log::output::CapturedOutput;
///
/// let sink = Arc::new(CapturedOutput::new());
/// let logger = TestLogger::new(sink.clone(), "Checkout");
///
/// let _scope = logger.begin_scope("cart 42");
/// logger
///     .log_message(LogLevel::Information, EventId::new(7), "paid")
///     .unwrap();
///
/// assert_eq!(sink.lines(), vec!["cart 42: Checkout [7] paid"]);
/// ```
pub struct TestLogger {
    sink: Arc<dyn TestOutput>,
    category: String,
    config: Arc<LoggerConfig>,
    scopes: ScopeStack,
}

impl fmt::Debug for TestLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestLogger")
            .field("category", &self.category)
            .field("config", &self.config)
            .field("scopes", &self.scopes)
            .finish_non_exhaustive()
    }
}

impl TestLogger {
    pub fn new(sink: Arc<dyn TestOutput>, category: impl Into<String>) -> Self {
        Self::with_config(sink, category, LoggerConfig::default())
    }

    pub fn with_config(
        sink: Arc<dyn TestOutput>,
        category: impl Into<String>,
        config: LoggerConfig,
    ) -> Self {
        Self::with_shared_config(sink, category, Arc::new(config))
    }

    pub(crate) fn with_shared_config(
        sink: Arc<dyn TestOutput>,
        category: impl Into<String>,
        config: Arc<LoggerConfig>,
    ) -> Self {
        Self {
            sink,
            category: category.into(),
            config,
            scopes: ScopeStack::new(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Every level is enabled; filtering is left to the test.
    pub fn is_enabled(&self, _level: LogLevel) -> bool {
        true
    }

    /// Enter a scope. It prefixes every line until the guard is dropped.
    pub fn begin_scope(&self, state: impl fmt::Display) -> ScopeGuard<'_> {
        self.scopes.push(state)
    }

    /// The scope prefix lines would carry right now.
    pub fn current_scope(&self) -> Option<String> {
        self.scopes.render(&self.config.scope_format)
    }

    /// Log one record.
    ///
    /// Writes the message line, then the error text if `error` is set, then
    /// the semantic dump if the state has entries whose key starts with the
    /// configured marker. A semantic entry with a null value fails with
    /// [`LogError::NullSemanticValue`] after the lines before it were
    /// written.
    pub fn log<S, F>(
        &self,
        _level: LogLevel,
        event_id: EventId,
        state: &S,
        error: Option<&(dyn Error + 'static)>,
        formatter: F,
    ) -> Result<(), LogError>
    where
        S: LogState + ?Sized,
        F: FnOnce(&S, Option<&(dyn Error + 'static)>) -> String,
    {
        let message = formatter(state, error);
        let scope = self.current_scope();
        write_record(
            self.sink.as_ref(),
            &self.config,
            scope.as_deref(),
            &self.category,
            &event_id,
            &message,
            error,
            state.structure(),
        )
    }

    /// Log a plain message with no error.
    pub fn log_message(
        &self,
        level: LogLevel,
        event_id: EventId,
        message: &str,
    ) -> Result<(), LogError> {
        self.log(level, event_id, message, None, display_formatter)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::output::CapturedOutput;
    use proptest::prelude::*;

    proptest! {
        /// Without a scope the line is exactly category, event and message.
        #[test]
        fn unscoped_line_shape(category in "[A-Za-z.]{1,16}", id in any::<i32>(), message in "[ -~]{0,40}") {
            let sink = Arc::new(CapturedOutput::new());
            let logger = TestLogger::new(sink.clone(), category.clone());
            logger.log_message(LogLevel::Information, EventId::new(id), &message).unwrap();

            prop_assert_eq!(sink.lines(), vec![format!("{} [{}] {}", category, id, message)]);
        }

        /// With a scope the line is prefixed by `"<scope>: "`.
        #[test]
        fn scoped_line_shape(scope in "[a-z0-9 ]{1,16}", message in "[ -~]{0,40}") {
            let sink = Arc::new(CapturedOutput::new());
            let logger = TestLogger::new(sink.clone(), "Cat");
            let _guard = logger.begin_scope(&scope);
            logger.log_message(LogLevel::Debug, EventId::default(), &message).unwrap();

            prop_assert_eq!(sink.lines(), vec![format!("{}: Cat [0] {}", scope, message)]);
        }
    }
}
