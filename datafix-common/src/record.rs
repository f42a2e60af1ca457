//! Record model
//!
//! A record is one JSON object from the top-level list. Field access goes
//! through [`Field`], which distinguishes a missing key from an explicit
//! `null` and from a concrete value, so transform rules can pattern match on
//! presence instead of probing the map directly.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Field name carrying the record identity (display only)
pub const ID_FIELD: &str = "_id";

/// Presence view of a single record field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<'a> {
    /// Key not in the record
    Absent,
    /// Key present with JSON `null`
    Null,
    /// Key present with a non-null value
    Value(&'a Value),
}

impl<'a> Field<'a> {
    fn from_slot(slot: Option<&'a Value>) -> Self {
        match slot {
            None => Field::Absent,
            Some(Value::Null) => Field::Null,
            Some(value) => Field::Value(value),
        }
    }

    /// Key exists in the record, whatever its value
    pub fn is_present(&self) -> bool {
        !matches!(self, Field::Absent)
    }

    /// Key exists and holds a truthy value
    ///
    /// `false`, zero, and empty strings, arrays or objects count as unset.
    pub fn is_set(&self) -> bool {
        match self {
            Field::Absent | Field::Null => false,
            Field::Value(value) => is_truthy(value),
        }
    }

    pub fn value(&self) -> Option<&'a Value> {
        match self {
            Field::Value(value) => Some(value),
            _ => None,
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Short name of a JSON value's type, for diagnostics
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One JSON object from a record collection
///
/// Key order is the order read from the file; new keys are appended and
/// overwritten keys keep their position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn field(&self, name: &str) -> Field<'_> {
        Field::from_slot(self.0.get(name))
    }

    /// Set a field, returning the previous value if the key existed
    pub fn set(&mut self, name: &str, value: Value) -> Option<Value> {
        self.0.insert(name.to_string(), value)
    }

    /// Set a field only when the key is absent
    ///
    /// Returns true when the field was inserted.
    pub fn set_if_absent(&mut self, name: &str, value: impl FnOnce() -> Value) -> bool {
        if self.field(name).is_present() {
            return false;
        }
        self.0.insert(name.to_string(), value());
        true
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn label(&self) -> RecordLabel<'_> {
        RecordLabel(self.0.get(ID_FIELD))
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Display form of a record's `_id`
///
/// Used for trace lines only; never as a lookup key.
#[derive(Debug, Clone, Copy)]
pub struct RecordLabel<'a>(Option<&'a Value>);

impl fmt::Display for RecordLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None | Some(Value::Null) => f.write_str("(no _id)"),
            Some(Value::String(id)) => f.write_str(id),
            // Extended JSON export form: {"$oid": "..."}
            Some(Value::Object(map)) => match map.get("$oid") {
                Some(Value::String(oid)) => f.write_str(oid),
                _ => write!(f, "{}", Value::Object(map.clone())),
            },
            Some(other) => write!(f, "{}", other),
        }
    }
}

/// Ordered list of records loaded from one file
pub type RecordCollection = Vec<Record>;
