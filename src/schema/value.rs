//! Runtime field values exchanged with the record source and the caller.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A persisted record or a set of caller-supplied parameters, keyed by field name
pub type Record = BTreeMap<String, Value>;

/// Value of a single field or action parameter
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Text(String),
    Bytes(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether the value carries something usable.
    ///
    /// Null, `false`, zero, empty text and empty content all count as not populated.
    pub fn is_populated(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Integer(i) => *i != 0,
            Value::Text(s) => !s.is_empty(),
            Value::Bytes(b) => !b.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Interpret the value as a positive copy count
    pub fn as_copies(&self) -> Option<u32> {
        match self {
            Value::Integer(n) if *n > 0 => u32::try_from(*n).ok(),
            Value::Text(s) => s.trim().parse::<u32>().ok().filter(|n| *n > 0),
            _ => None,
        }
    }

    /// Interpret the value as printable content
    pub fn to_content(&self) -> Option<Vec<u8>> {
        match self {
            Value::Bytes(b) if !b.is_empty() => Some(b.clone()),
            Value::Text(s) if !s.is_empty() => Some(s.as_bytes().to_vec()),
            _ => None,
        }
    }

    /// Render the value as a display string, used for queue ids and file names
    pub fn to_display_string(&self) -> Option<String> {
        match self {
            Value::Text(s) if !s.is_empty() => Some(s.clone()),
            Value::Integer(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}
