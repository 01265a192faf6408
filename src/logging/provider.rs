//! Logger provider.
//!
//! Hands out category loggers that share one sink and one config.

use std::sync::Arc;

use crate::output::TestOutput;

use super::config::LoggerConfig;
use super::logger::TestLogger;

#[derive(Clone)]
pub struct TestLoggerProvider {
    sink: Arc<dyn TestOutput>,
    config: Arc<LoggerConfig>,
}

impl std::fmt::Debug for TestLoggerProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestLoggerProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TestLoggerProvider {
    pub fn new(sink: Arc<dyn TestOutput>) -> Self {
        Self::with_config(sink, LoggerConfig::default())
    }

    pub fn with_config(sink: Arc<dyn TestOutput>, config: LoggerConfig) -> Self {
        log::debug!(
            "TEST_LOGGER_PROVIDER_CREATED marker={} scope_format={:?}",
            config.semantic_marker,
            config.scope_format
        );
        Self {
            sink,
            config: Arc::new(config),
        }
    }

    /// New logger for `category`. Each logger has its own scope stack.
    pub fn create_logger(&self, category: impl Into<String>) -> TestLogger {
        TestLogger::with_shared_config(self.sink.clone(), category, self.config.clone())
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }
}
