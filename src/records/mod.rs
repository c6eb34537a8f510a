//! Loosely-typed upstream records
//!
//! The spreadsheet API returns rows whose field names drift between sheets
//! and API versions ("Pay Date", "pay_date", "PayDate"). This module provides:
//! - `ExternalRecord`: an insertion-ordered key/value row
//! - `RecordValue`: the closed set of scalar shapes a cell can hold
//! - `normalize_key`: the canonical form used to compare field names
//! - `resolve`: the two-pass alias lookup used by every page

pub mod normalize;
pub mod resolve;

pub use normalize::normalize_key;
pub use resolve::resolve;

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// A single cell value from an upstream row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl RecordValue {
    /// True for the values every formatter renders as the placeholder.
    pub fn is_blank(&self) -> bool {
        match self {
            RecordValue::Null => true,
            RecordValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// String form as the upstream would show it; `Null` is the empty string.
    pub fn as_text(&self) -> String {
        match self {
            RecordValue::Null => String::new(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordValue::Null => Ok(()),
            RecordValue::Bool(b) => write!(f, "{}", b),
            RecordValue::Number(n) => write!(f, "{}", n),
            RecordValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&Value> for RecordValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => RecordValue::Null,
            Value::Bool(b) => RecordValue::Bool(*b),
            Value::Number(n) => RecordValue::Number(n.clone()),
            Value::String(s) => RecordValue::String(s.clone()),
            // Nested cells are not expected from a sheet row; keep their JSON text
            nested => RecordValue::String(nested.to_string()),
        }
    }
}

impl From<&str> for RecordValue {
    fn from(value: &str) -> Self {
        RecordValue::String(value.to_string())
    }
}

/// One upstream row. Keys are unique; iteration follows upstream order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalRecord {
    fields: Vec<(String, RecordValue)>,
}

impl ExternalRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON object, keeping the object's key order.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        Self {
            fields: object
                .iter()
                .map(|(k, v)| (k.clone(), RecordValue::from(v)))
                .collect(),
        }
    }

    /// Build from a JSON value; anything other than an object is `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        value.as_object().map(Self::from_json_object)
    }

    /// Set a field, replacing the value in place when the key already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RecordValue>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RecordValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Exact-key lookup (no normalization).
    pub fn get(&self, key: &str) -> Option<&RecordValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RecordValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<RecordValue>> FromIterator<(K, V)> for ExternalRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = ExternalRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}
