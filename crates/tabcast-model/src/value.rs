//! The canonical cell value union.

use serde::{Serialize, Serializer};

/// A normalized scalar value.
///
/// Every raw cell from any source coerces into exactly one variant. The
/// `Nested` variant holds the compact JSON text of a list or object leaf;
/// it is kept as text rather than as a tree so that every variant is
/// representable in all three output formats.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Compact JSON re-encoding of a nested list/object.
    Nested(String),
}

impl Value {
    /// Returns true for the `Null` variant.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Projects the value into a `serde_json::Value`.
    ///
    /// `Nested` maps to a JSON *string* containing the re-encoded
    /// sub-structure, not to the structure itself.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::Str(s) | Value::Nested(s) => serde_json::Value::String(s.clone()),
        }
    }

    /// Formats the value as a single CSV field.
    ///
    /// Null becomes an empty field; booleans and numbers keep their native
    /// textual form; nested structures stay as their raw JSON text.
    pub fn to_csv_field(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Str(s) | Value::Nested(s) => s.clone(),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) | Value::Nested(s) => serializer.serialize_str(s),
        }
    }
}
