//! Scoped structured logging into a test output sink.
//!
//! - `level` - severities and event ids
//! - `structured` - log state and its key/value entries
//! - `template` - `{Name}` message templates
//! - `scope` - per-logger scope stack
//! - `config` - formatting options
//! - `logger` - the logger itself
//! - `provider` - category loggers over one sink

pub mod config;
pub mod level;
pub mod logger;
pub mod provider;
pub mod scope;
pub mod structured;
pub mod template;

pub use config::*;
pub use level::*;
pub use logger::*;
pub use provider::*;
pub use scope::*;
pub use structured::*;
pub use template::*;
