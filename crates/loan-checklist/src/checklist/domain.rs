use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque identifier of an application record at the remote source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Loan application data as delivered by the source.
///
/// The schema is open: any JSON object is accepted and fields no rule reads are ignored.
/// Accessors return `None` for absent or wrong-typed fields rather than failing, which is what
/// keeps every predicate total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationRecord(Map<String, Value>);

impl ApplicationRecord {
    /// Returns `None` unless `value` is a JSON object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Strict boolean: the string `"true"` is not a flag.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.field(name).and_then(Value::as_bool)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    /// Numeric field that is present and non-zero.
    pub fn amount(&self, name: &str) -> Option<f64> {
        self.field(name)
            .and_then(Value::as_f64)
            .filter(|value| *value != 0.0 && !value.is_nan())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
