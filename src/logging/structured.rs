//! Structured log state.
//!
//! A state is whatever the caller logs. It is formatted to text by the
//! caller's formatter and may also expose key/value entries, which is where
//! semantic (`@`-prefixed) entries come from.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::LogError;
use crate::reporting::{ReportedField, ReportedObject, Reportable};

/// Value of one state entry.
#[derive(Debug, Clone, PartialEq)]
pub enum StateValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Object(ReportedObject),
}

impl StateValue {
    /// Snapshot a serializable value for the semantic dump.
    pub fn semantic<T: Serialize + ?Sized>(value: &T) -> Result<Self, LogError> {
        ReportedObject::from_serialize(value).map(StateValue::Object)
    }

    pub fn reportable<T: Reportable>(value: &T) -> Self {
        StateValue::Object(ReportedObject::from_reportable(value))
    }

    pub fn display(value: impl fmt::Display) -> Self {
        StateValue::Text(value.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, StateValue::Null)
    }

    /// Fields dumped for a semantic entry. Scalars have none; `Null` has no
    /// value to enumerate at all.
    pub fn reported_fields(&self) -> Option<&[ReportedField]> {
        match self {
            StateValue::Null => None,
            StateValue::Object(object) => Some(&object.fields),
            _ => Some(&[]),
        }
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateValue::Null => f.write_str("(null)"),
            StateValue::Bool(v) => write!(f, "{}", v),
            StateValue::Int(v) => write!(f, "{}", v),
            StateValue::UInt(v) => write!(f, "{}", v),
            StateValue::Float(v) => write!(f, "{}", v),
            StateValue::Text(v) => f.write_str(v),
            StateValue::Object(object) => write!(f, "{}", object),
        }
    }
}

macro_rules! state_value_from {
    ($variant:ident, $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for StateValue {
                fn from(value: $source) -> Self {
                    StateValue::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

state_value_from!(Int, i64: i8, i16, i32, i64);
state_value_from!(UInt, u64: u8, u16, u32, u64);
state_value_from!(Float, f64: f32, f64);
state_value_from!(Bool, bool: bool);

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        StateValue::Text(value.to_string())
    }
}

impl From<String> for StateValue {
    fn from(value: String) -> Self {
        StateValue::Text(value)
    }
}

impl From<ReportedObject> for StateValue {
    fn from(value: ReportedObject) -> Self {
        StateValue::Object(value)
    }
}

impl<T: Into<StateValue>> From<Option<T>> for StateValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(StateValue::Null)
    }
}

/// Objects become reportable snapshots typed `Object`; arrays keep their
/// JSON text.
impl From<Value> for StateValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => StateValue::Null,
            Value::Bool(b) => StateValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    StateValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    StateValue::UInt(u)
                } else {
                    StateValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => StateValue::Text(s),
            array @ Value::Array(_) => StateValue::Text(array.to_string()),
            Value::Object(map) => StateValue::Object(ReportedObject::from_json_map("Object", map)),
        }
    }
}

/// One key/value pair of a structured state.
#[derive(Debug, Clone, PartialEq)]
pub struct StateEntry {
    pub key: String,
    pub value: StateValue,
}

impl StateEntry {
    pub fn new(key: impl Into<String>, value: impl Into<StateValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn is_semantic(&self, marker: char) -> bool {
        self.key.starts_with(marker)
    }
}

/// Something that can be logged.
///
/// States that carry key/value entries return them from [`structure`];
/// plain text states keep the default.
///
/// [`structure`]: LogState::structure
pub trait LogState {
    fn structure(&self) -> Option<&[StateEntry]> {
        None
    }
}

impl LogState for str {}

impl LogState for String {}

impl LogState for [StateEntry] {
    fn structure(&self) -> Option<&[StateEntry]> {
        Some(self)
    }
}

impl LogState for Vec<StateEntry> {
    fn structure(&self) -> Option<&[StateEntry]> {
        Some(self)
    }
}

impl<T: LogState + ?Sized> LogState for &T {
    fn structure(&self) -> Option<&[StateEntry]> {
        (**self).structure()
    }
}
