//! Snapshots taken through `serde::Serialize`.
//!
//! Lets any serializable struct act as a semantic value without a
//! hand-written [`Reportable`](super::Reportable) impl.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::LogError;

use super::reportable::{short_type_name, FieldValue, ReportedField, ReportedObject};

impl ReportedObject {
    /// Snapshot a serializable value. The value must serialize to a JSON
    /// object; its keys become field names in serialization order.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, LogError> {
        let json = serde_json::to_value(value).map_err(LogError::Serialize)?;
        Self::from_json(short_type_name::<T>(), json)
    }

    pub(crate) fn from_json(type_name: &str, json: Value) -> Result<Self, LogError> {
        match json {
            Value::Object(map) => Ok(Self::from_json_map(type_name, map)),
            other => Err(LogError::NotAnObject {
                type_name: type_name.to_string(),
                found: json_kind(&other),
            }),
        }
    }

    pub(crate) fn from_json_map(type_name: &str, map: Map<String, Value>) -> Self {
        let fields = map
            .into_iter()
            .map(|(name, value)| ReportedField {
                name,
                value: FieldValue::from(value),
            })
            .collect();
        Self::new(type_name, fields)
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    FieldValue::UInt(u)
                } else {
                    FieldValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => FieldValue::Text(s),
            nested @ Value::Array(_) => FieldValue::Nested {
                display: nested.to_string(),
                type_name: "Array".to_string(),
            },
            nested @ Value::Object(_) => FieldValue::Nested {
                display: nested.to_string(),
                type_name: "Object".to_string(),
            },
        }
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
