//! Bridge from the `log` facade into a test output sink.

pub mod log_bridge;

pub use log_bridge::*;
