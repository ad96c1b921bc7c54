//! Dynamic values stored in collections and bags
//!
//! [`Value`] covers the kinds of data the helpers work with: null, booleans,
//! integers, floats, strings and nested [`Collection`]s. Equality between values
//! is strict: two values are equal only when they have the same kind and the
//! same content, so `Int(1)` never equals `Float(1.0)` or `String("1")`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::collection::Collection;
use crate::error::ArgumentTypeError;

// ============================================================================
// Key
// ============================================================================

/// A collection key: either an integer or a string.
///
/// Keys built from strings always stay string keys, even when the string
/// happens to look like a number. The exception is keys read back from a
/// serialized map, see [`Key::normalize_map_key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    /// Returns the integer value for integer keys
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(i) => Some(*i),
            Key::Str(_) => None,
        }
    }

    /// Returns the string value for string keys
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Int(_) => None,
            Key::Str(s) => Some(s),
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Key::Int(_))
    }

    pub fn is_str(&self) -> bool {
        matches!(self, Key::Str(_))
    }

    /// Turns a string key in canonical integer form (`"0"`, `"42"`, `"-7"`) into
    /// an integer key.
    ///
    /// Map keys are strings in formats like JSON, so integer keys come back as
    /// strings after a round trip. Non-canonical forms such as `"007"`, `"+1"`
    /// or `"-0"` stay strings.
    pub fn normalize_map_key(self) -> Key {
        match self {
            Key::Str(s) => match s.parse::<i64>() {
                Ok(i) if i.to_string() == s => Key::Int(i),
                _ => Key::Str(s),
            },
            int => int,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{}", i),
            Key::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Int(i64::from(value))
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}

impl From<&Key> for Value {
    fn from(key: &Key) -> Self {
        match key {
            Key::Int(i) => Value::Int(*i),
            Key::Str(s) => Value::String(s.clone()),
        }
    }
}

// ============================================================================
// Value
// ============================================================================

/// A dynamically typed value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Collection),
}

impl Value {
    /// Debug type name: `null`, `bool`, `int`, `float`, `string` or `array`
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
        }
    }

    /// Whether this value counts as empty.
    ///
    /// Empty values are `null`, `false`, `0`, `0.0`, `""`, `"0"` and empty arrays.
    /// Everything else, including `"0.0"` and `" "`, is non-empty.
    pub fn is_empty_value(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Int(i) => *i == 0,
            Value::Float(f) => *f == 0.0,
            Value::String(s) => s.is_empty() || s == "0",
            Value::Array(c) => c.is_empty(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn as_array(&self) -> Option<&Collection> {
        match self {
            Value::Array(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Collection> for Value {
    fn from(value: Collection) -> Self {
        Value::Array(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Array(values.into_iter().collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// JSON objects become collections in document order, with canonical integer
/// member names turned into integer keys. JSON arrays become lists keyed `0..n`. Integers that do not fit `i64` become floats.
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Array(
                map.into_iter()
                    .map(|(k, v)| (Key::Str(k).normalize_map_key(), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

// ============================================================================
// Strict conversions out of Value
// ============================================================================

impl TryFrom<Value> for bool {
    type Error = ArgumentTypeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(ArgumentTypeError::new(&other, ["bool"])),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = ArgumentTypeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(i) => Ok(i),
            other => Err(ArgumentTypeError::new(&other, ["int"])),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = ArgumentTypeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Float(f) => Ok(f),
            other => Err(ArgumentTypeError::new(&other, ["float"])),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = ArgumentTypeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(ArgumentTypeError::new(&other, ["string"])),
        }
    }
}

impl TryFrom<Value> for Collection {
    type Error = ArgumentTypeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(c) => Ok(c),
            other => Err(ArgumentTypeError::new(&other, ["array"])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::from(true).type_name(), "bool");
        assert_eq!(Value::from(1).type_name(), "int");
        assert_eq!(Value::from(1.5).type_name(), "float");
        assert_eq!(Value::from("x").type_name(), "string");
        assert_eq!(Value::from(json!([1])).type_name(), "array");
    }

    #[test]
    fn test_strict_equality() {
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::Int(1), Value::from("1"));
        assert_ne!(Value::Bool(false), Value::Null);
        assert_eq!(Value::from("a"), Value::String("a".into()));
    }

    #[test]
    fn test_empty_values() {
        for empty in [
            Value::Null,
            Value::Bool(false),
            Value::Int(0),
            Value::Float(0.0),
            Value::from(""),
            Value::from("0"),
            Value::Array(Collection::new()),
        ] {
            assert!(empty.is_empty_value(), "{:?} should be empty", empty);
        }
    }

    #[test]
    fn test_non_empty_values() {
        for value in [
            Value::Bool(true),
            Value::Int(-1),
            Value::Float(0.1),
            Value::from("0.0"),
            Value::from(" "),
            Value::from("false"),
            Value::from(json!([0])),
        ] {
            assert!(!value.is_empty_value(), "{:?} should not be empty", value);
        }
    }

    #[test]
    fn test_from_json_object_keeps_order() {
        let value = Value::from(json!({"b": 1, "a": 2}));
        let keys: Vec<Key> = value.as_array().map(|c| c.keys().cloned().collect()).unwrap_or_default();
        assert_eq!(keys, vec![Key::from("b"), Key::from("a")]);
    }

    #[test]
    fn test_from_json_array_uses_integer_keys() {
        let value = Value::from(json!(["x", "y"]));
        let c = value.as_array().unwrap();
        assert_eq!(c.get(&Key::Int(1)), Some(&Value::from("y")));
    }

    #[test]
    fn test_try_from_mismatch_reports_types() {
        let err = i64::try_from(Value::from("12")).unwrap_err();
        assert_eq!(err.actual_type(), "string");
        assert_eq!(err.expected_types(), ["int".to_string()]);

        assert_eq!(String::try_from(Value::from("ok")).unwrap(), "ok");
        assert!(Collection::try_from(Value::Null).is_err());
    }

    #[test]
    fn test_key_display_and_accessors() {
        assert_eq!(Key::from(7).to_string(), "7");
        assert_eq!(Key::from("7").to_string(), "7");
        assert!(Key::from("7").is_str());
        assert_eq!(Key::from(7).as_int(), Some(7));
        assert_eq!(Key::from("a").as_str(), Some("a"));
    }

    #[test]
    fn test_value_json_round_trip_shape() {
        let value = Value::from(json!({"name": "x", "tags": ["a", "b"], "n": null}));
        let encoded = serde_json::to_value(&value).unwrap();
        assert_eq!(encoded, json!({"name": "x", "tags": ["a", "b"], "n": null}));
    }

    #[test]
    fn test_normalize_map_key() {
        assert_eq!(Key::from("42").normalize_map_key(), Key::Int(42));
        assert_eq!(Key::from("-7").normalize_map_key(), Key::Int(-7));
        assert_eq!(Key::from("0").normalize_map_key(), Key::Int(0));
        for kept in ["007", "+1", "-0", " 1", "1.0", "99999999999999999999", "a"] {
            assert_eq!(Key::from(kept).normalize_map_key(), Key::from(kept), "{}", kept);
        }
        assert_eq!(Key::Int(3).normalize_map_key(), Key::Int(3));
    }

    #[test]
    fn test_json_object_integer_member_names() {
        let value = Value::from(json!({"5": "x", "name": "y"}));
        let c = value.as_array().unwrap();
        assert_eq!(c.get(&Key::Int(5)), Some(&Value::from("x")));
        assert_eq!(c.next_index(), Some(6));
    }
}
