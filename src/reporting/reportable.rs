//! Reportable capability and field snapshots.

use std::fmt;

/// Types that expose their own field list for the semantic dump.
///
/// Fields are reported in the order returned.
///
/// ```
/// use scoped_test_log::reporting::{FieldValue, Reportable, ReportedField};
///
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// impl Reportable for User {
///     fn reported_fields(&self) -> Vec<ReportedField> {
///         vec![
///             ReportedField::new("name", self.name.as_str()),
///             ReportedField::new("age", self.age),
///         ]
///     }
/// }
/// ```
pub trait Reportable {
    fn reported_fields(&self) -> Vec<ReportedField>;
}

/// Value of one reported field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    /// Anything structured (arrays, nested objects), pre-rendered.
    Nested { display: String, type_name: String },
}

impl FieldValue {
    pub fn type_name(&self) -> &str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "i64",
            FieldValue::UInt(_) => "u64",
            FieldValue::Float(_) => "f64",
            FieldValue::Text(_) => "String",
            FieldValue::Nested { type_name, .. } => type_name,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(v) => write!(f, "{}", v),
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::UInt(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Text(v) => f.write_str(v),
            FieldValue::Nested { display, .. } => f.write_str(display),
        }
    }
}

macro_rules! field_value_from {
    ($variant:ident, $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for FieldValue {
                fn from(value: $source) -> Self {
                    FieldValue::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

field_value_from!(Int, i64: i8, i16, i32, i64);
field_value_from!(UInt, u64: u8, u16, u32, u64);
field_value_from!(Float, f64: f32, f64);
field_value_from!(Bool, bool: bool);

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// One `name: value` pair of a reported object.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportedField {
    pub name: String,
    pub value: FieldValue,
}

impl ReportedField {
    pub fn new(name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for ReportedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.name, self.value, self.value.type_name())
    }
}

/// Snapshot of a value's type name and fields, taken when the log state is
/// built.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportedObject {
    pub type_name: String,
    pub fields: Vec<ReportedField>,
}

impl ReportedObject {
    pub fn new(type_name: impl Into<String>, fields: Vec<ReportedField>) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    pub fn from_reportable<T: Reportable>(value: &T) -> Self {
        Self::new(short_type_name::<T>(), value.reported_fields())
    }
}

/// Displays as the short type name, like an object without a custom
/// string form.
impl fmt::Display for ReportedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name)
    }
}

/// Last path segment of `T`'s type name, generic arguments dropped.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Account {
        id: u64,
        owner: Option<String>,
        balance: f64,
    }

    impl Reportable for Account {
        fn reported_fields(&self) -> Vec<ReportedField> {
            vec![
                ReportedField::new("id", self.id),
                ReportedField::new("owner", self.owner.clone()),
                ReportedField::new("balance", self.balance),
            ]
        }
    }

    #[test]
    fn test_field_line_format() {
        let field = ReportedField::new("age", 42i32);
        assert_eq!(field.to_string(), "age: 42 (i64)");

        let field = ReportedField::new("name", "Ada");
        assert_eq!(field.to_string(), "name: Ada (String)");
    }

    #[test]
    fn test_null_field_renders_empty_value() {
        let field = ReportedField::new("owner", None::<String>);
        assert_eq!(field.to_string(), "owner:  (null)");
    }

    #[test]
    fn test_from_reportable_keeps_field_order() {
        let account = Account {
            id: 7,
            owner: Some("ada".to_string()),
            balance: 12.5,
        };
        let object = ReportedObject::from_reportable(&account);

        assert_eq!(object.type_name, "Account");
        let names: Vec<_> = object.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "owner", "balance"]);
        assert_eq!(object.fields[2].to_string(), "balance: 12.5 (f64)");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name::<String>(), "String");
        assert_eq!(short_type_name::<Vec<u8>>(), "Vec");
        assert_eq!(short_type_name::<u32>(), "u32");
    }
}
