//! `log::Log` adapter.
//!
//! Records from `log::info!` and friends are rendered exactly like
//! [`TestLogger`](crate::logging::TestLogger) lines: the record target is
//! the category and the record's key/values are the state entries.

use std::fmt::Write as _;
use std::sync::Arc;

use env_logger::filter::{Builder as FilterBuilder, Filter};
use log::kv::{self, Key, Value, VisitSource};
use log::{LevelFilter, Metadata, Record};

use crate::error::LogError;
use crate::logging::logger::write_record;
use crate::logging::{EventId, LoggerConfig, ScopeFormat, ScopeGuard, ScopeStack, StateEntry, StateValue};
use crate::output::TestOutput;

/// Environment variable read by [`LogBridge::from_env`] when no name is
/// given.
pub const DEFAULT_FILTER_ENV: &str = "TEST_LOG";

pub struct LogBridge {
    sink: Arc<dyn TestOutput>,
    config: LoggerConfig,
    filter: Option<Filter>,
    scopes: Arc<ScopeStack>,
}

impl std::fmt::Debug for LogBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogBridge")
            .field("config", &self.config)
            .field("max_level", &self.max_level())
            .finish_non_exhaustive()
    }
}

impl LogBridge {
    /// Bridge with default config that lets every record through.
    pub fn new(sink: Arc<dyn TestOutput>) -> Self {
        Self {
            sink,
            config: LoggerConfig::default(),
            filter: None,
            scopes: Arc::new(ScopeStack::new()),
        }
    }

    pub fn with_config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Filter with `env_logger` directives, e.g. `"info,my_crate::db=trace"`.
    pub fn with_filter(mut self, directives: &str) -> Self {
        self.filter = Some(FilterBuilder::new().parse(directives).build());
        self
    }

    /// Read filter directives from `var` (or [`DEFAULT_FILTER_ENV`]). An
    /// unset variable leaves the bridge unfiltered.
    pub fn from_env(self, var: Option<&str>) -> Self {
        let var = var.unwrap_or(DEFAULT_FILTER_ENV);
        match std::env::var(var) {
            Ok(directives) => self.with_filter(&directives),
            Err(_) => self,
        }
    }

    pub fn max_level(&self) -> LevelFilter {
        self.filter
            .as_ref()
            .map_or(LevelFilter::Trace, |filter| filter.filter())
    }

    /// Handle onto this bridge's scope stack.
    pub fn handle(&self) -> BridgeHandle {
        BridgeHandle {
            scopes: self.scopes.clone(),
            scope_format: self.config.scope_format.clone(),
        }
    }

    /// Register as the global `log` logger.
    pub fn install(self) -> Result<BridgeHandle, LogError> {
        let handle = self.handle();
        let max_level = self.max_level();
        log::set_boxed_logger(Box::new(self)).map_err(|_| LogError::AlreadyInstalled)?;
        log::set_max_level(max_level);
        log::debug!("TEST_LOG_BRIDGE_INSTALLED max_level={}", max_level);
        Ok(handle)
    }

    fn write(&self, record: &Record<'_>) -> Result<(), LogError> {
        let mut collector = EntryCollector::default();
        if let Err(e) = record.key_values().visit(&mut collector) {
            eprintln!("test log bridge: key/values cut short: {}", e);
        }

        let scope = self.scopes.render(&self.config.scope_format);
        let message = record.args().to_string();
        write_record(
            self.sink.as_ref(),
            &self.config,
            scope.as_deref(),
            record.target(),
            &EventId::default(),
            &message,
            None,
            Some(&collector.entries),
        )
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.filter
            .as_ref()
            .map_or(true, |filter| filter.enabled(metadata))
    }

    fn log(&self, record: &Record<'_>) {
        let wanted = self
            .filter
            .as_ref()
            .map_or(true, |filter| filter.matches(record));
        if !wanted {
            return;
        }
        // Logging here would recurse into this bridge.
        if let Err(e) = self.write(record) {
            eprintln!("test log bridge: {}", e);
        }
    }

    fn flush(&self) {}
}

#[derive(Default)]
struct EntryCollector {
    entries: Vec<StateEntry>,
}

impl<'kvs> VisitSource<'kvs> for EntryCollector {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), kv::Error> {
        // Values serde_json can't represent keep their display form.
        let state = match serde_json::to_value(&value) {
            Ok(json) => StateValue::from(json),
            Err(_) => {
                let mut text = String::new();
                // A failing Display keeps whatever it wrote before failing.
                let _ = write!(text, "{}", value);
                StateValue::Text(text)
            }
        };
        self.entries.push(StateEntry::new(key.as_str(), state));
        Ok(())
    }
}

/// Scope access for an installed bridge.
#[derive(Debug, Clone)]
pub struct BridgeHandle {
    scopes: Arc<ScopeStack>,
    scope_format: ScopeFormat,
}

impl BridgeHandle {
    pub fn begin_scope(&self, state: impl std::fmt::Display) -> ScopeGuard<'_> {
        self.scopes.push(state)
    }

    pub fn current_scope(&self) -> Option<String> {
        self.scopes.render(&self.scope_format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::CapturedOutput;
    use log::{Level, Log};
    use serde::Serialize;
    use std::collections::HashMap;

    #[derive(Serialize)]
    struct Session {
        id: u32,
        user: &'static str,
    }

    fn bridge() -> (Arc<CapturedOutput>, LogBridge) {
        let sink = Arc::new(CapturedOutput::new());
        (sink.clone(), LogBridge::new(sink))
    }

    fn emit(bridge: &LogBridge, level: Level, target: &str, message: &str) {
        bridge.log(
            &Record::builder()
                .level(level)
                .target(target)
                .args(format_args!("{}", message))
                .build(),
        );
    }

    #[test]
    fn test_record_renders_with_target_as_category() {
        let (sink, bridge) = bridge();
        emit(&bridge, Level::Info, "checkout", "paid");
        assert_eq!(sink.lines(), vec!["checkout [0] paid"]);
    }

    #[test]
    fn test_scope_prefix_from_handle() {
        let (sink, bridge) = bridge();
        let handle = bridge.handle();
        {
            let _scope = handle.begin_scope("order 9");
            emit(&bridge, Level::Warn, "checkout", "slow");
        }
        emit(&bridge, Level::Warn, "checkout", "done");
        assert_eq!(
            sink.lines(),
            vec!["order 9: checkout [0] slow", "checkout [0] done"]
        );
    }

    #[test]
    fn test_semantic_key_values_are_dumped() {
        let (sink, bridge) = bridge();
        let session = Session { id: 4, user: "ada" };
        let kvs = [
            ("@session", Value::from_serde(&session)),
            ("attempt", Value::from(2u32)),
        ];
        bridge.log(
            &Record::builder()
                .level(Level::Info)
                .target("auth")
                .args(format_args!("login"))
                .key_values(&kvs)
                .build(),
        );

        assert_eq!(
            sink.lines(),
            vec![
                "auth [0] login",
                "Values that may be sent to a value store:",
                "id: 4 (i64)",
                "user: ada (String)",
            ]
        );
    }

    #[test]
    fn test_unserializable_value_keeps_later_entries() {
        let (sink, bridge) = bridge();
        let mut tuple_keys = HashMap::new();
        tuple_keys.insert((1u8, 2u8), 3u8);
        let session = Session { id: 4, user: "ada" };
        let kvs = [
            ("grid", Value::from_serde(&tuple_keys)),
            ("@session", Value::from_serde(&session)),
        ];
        bridge.log(
            &Record::builder()
                .level(Level::Info)
                .target("auth")
                .args(format_args!("login"))
                .key_values(&kvs)
                .build(),
        );

        assert_eq!(
            sink.lines(),
            vec![
                "auth [0] login",
                "Values that may be sent to a value store:",
                "id: 4 (i64)",
                "user: ada (String)",
            ]
        );
    }

    #[test]
    fn test_filter_directives() {
        let (sink, bridge) = bridge();
        let bridge = bridge.with_filter("warn,auth=debug");

        assert_eq!(bridge.max_level(), LevelFilter::Debug);
        assert!(!bridge.enabled(&Metadata::builder().level(Level::Info).target("db").build()));
        assert!(bridge.enabled(&Metadata::builder().level(Level::Debug).target("auth").build()));

        emit(&bridge, Level::Info, "db", "dropped");
        emit(&bridge, Level::Error, "db", "kept");
        emit(&bridge, Level::Debug, "auth", "also kept");
        assert_eq!(sink.lines(), vec!["db [0] kept", "auth [0] also kept"]);
    }

    #[test]
    fn test_unfiltered_by_default() {
        let (_sink, bridge) = bridge();
        assert_eq!(bridge.max_level(), LevelFilter::Trace);
        assert!(bridge.enabled(&Metadata::builder().level(Level::Trace).target("x").build()));
    }

    #[test]
    fn test_from_env_unset_leaves_unfiltered() {
        let (_sink, bridge) = bridge();
        let bridge = bridge.from_env(Some("SCOPED_TEST_LOG_UNSET_FOR_TEST"));
        assert_eq!(bridge.max_level(), LevelFilter::Trace);
    }

    #[test]
    fn test_closed_sink_does_not_panic() {
        let (sink, bridge) = bridge();
        sink.close();
        emit(&bridge, Level::Error, "x", "ignored");
        assert!(sink.lines().is_empty());
    }
}
