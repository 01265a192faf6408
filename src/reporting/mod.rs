//! Reportable values.
//!
//! Semantic log entries dump the fields of their value. Types expose those
//! fields through [`Reportable`] or through `serde::Serialize`; either way
//! the fields are snapshotted into a [`ReportedObject`] when the log state
//! is built.

pub mod reportable;
pub mod serialized;

pub use reportable::*;
