//! Structured extra fields attached to log events
//!
//! This module provides:
//! - `FieldValue`: the closed set of value types a field may hold
//! - `LogFields`: an insertion-ordered key/value mapping with reserved-key
//!   filtering

use crate::core::util::format_timestamp;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

/// Keys that collide with the log event's own properties. Fields with these
/// keys are silently dropped, never an error.
pub const RESERVED_KEYS: &[&str] = &["type", "severity", "message", "timestamp"];

/// A zero-argument callback field, evaluated when the field is rendered.
pub type FieldCallback = Arc<dyn Fn() -> String + Send + Sync>;

/// Value type for structured log fields.
///
/// Depth is one by construction: nested mappings and sequences are
/// unrepresentable here, and the loosely-typed candidate path rejects them
/// at the boundary.
#[derive(Clone)]
pub enum FieldValue {
    Str(String),
    Num(f64),
    Time(DateTime<Utc>),
    Callback(FieldCallback),
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => f.debug_tuple("Str").field(s).finish(),
            FieldValue::Num(n) => f.debug_tuple("Num").field(n).finish(),
            FieldValue::Time(t) => f.debug_tuple("Time").field(t).finish(),
            FieldValue::Callback(_) => f.debug_tuple("Callback").field(&"<fn>").finish(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => write!(f, "{}", s),
            FieldValue::Num(n) => write!(f, "{}", n),
            FieldValue::Time(t) => write!(f, "{}", format_timestamp(t)),
            FieldValue::Callback(cb) => write!(f, "{}", cb()),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Num(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Num(n as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Num(n as f64)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(t: DateTime<Utc>) -> Self {
        FieldValue::Time(t)
    }
}

impl From<FieldCallback> for FieldValue {
    fn from(cb: FieldCallback) -> Self {
        FieldValue::Callback(cb)
    }
}

/// Insertion-ordered mapping of field names to values.
#[derive(Debug, Clone, Default)]
pub struct LogFields {
    entries: Vec<(String, FieldValue)>,
}

impl LogFields {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a field, preserving insertion order. Inserting an existing key
    /// overwrites the value in place; reserved keys are silently dropped.
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let key = key.into();
        if RESERVED_KEYS.contains(&key.as_str()) {
            return;
        }
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value.into(),
            None => self.entries.push((key, value.into())),
        }
    }

    /// Builder-style insert
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Format fields as `key=value` pairs in insertion order
    pub fn format_fields(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for LogFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}
