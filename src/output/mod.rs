//! Test output sinks.
//!
//! A sink receives finished log lines, one call per line, the way a test
//! framework's output helper does.

pub mod sink;

pub use sink::*;
