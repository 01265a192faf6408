//! Scoped test logging - structured log records into test output
//!
//! Routes log records into a test framework's line-oriented output sink.
//! Every record becomes one line, optionally prefixed by the active scope:
//!
//! ```text
//! <scope>: <category> [<event id>] <message>
//! ```
//!
//! followed by the error text when an error is attached, and by a field dump
//! for "semantic" state entries (keys starting with `@`).
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `logging` - `TestLogger`, its scope stack, state and message templates
//! - `reporting` - the `Reportable` capability and field snapshots
//! - `output` - test output sinks
//! - `bridge` - `log::Log` implementation over the same formatting
//! - `error` - error types
//!
//! ```
//! use std::sync::Arc;
//! use scoped_test_log::logging::{
//!     display_formatter, EventId, FormattedState, LogLevel, StateValue, TestLogger,
//! };
//! use scoped_test_log::output::CapturedOutput;
//!
//! #[derive(serde::Serialize)]
//! struct User {
//!     name: &'static str,
//! }
//!
//! let sink = Arc::new(CapturedOutput::new());
//! let logger = TestLogger::new(sink.clone(), "Accounts");
//!
//! let state = FormattedState::new(
//!     "Created {@user}",
//!     vec![StateValue::semantic(&User { name: "ada" }).unwrap()],
//! );
//! logger
//!     .log(LogLevel::Information, EventId::new(1), &state, None, display_formatter)
//!     .unwrap();
//!
//! assert_eq!(
//!     sink.lines(),
//!     vec![
//!         "Accounts [1] Created User",
//!         "Values that may be sent to a value store:",
//!         "name: ada (String)",
//!     ]
//! );
//! ```

pub mod bridge;
pub mod error;
pub mod logging;
pub mod output;
pub mod reporting;

pub use bridge::{BridgeHandle, LogBridge};
pub use error::{LogError, SinkError};
pub use logging::{EventId, LogLevel, LoggerConfig, TestLogger, TestLoggerProvider};
pub use output::{CapturedOutput, StdoutOutput, TestOutput};
pub use reporting::{Reportable, ReportedField};
