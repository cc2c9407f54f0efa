// File: ./src/value.rs
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;

/// Record identifiers are host-assigned strings (numeric in practice).
pub type RecordId = String;

/// The set of property values being written by one mutation, keyed by
/// property name. Audits receive this map and may rewrite it before the
/// host commits it.
pub type Values = HashMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Reference(RecordId),
    References(Vec<RecordId>),
    Timestamp(DateTime<Utc>),
    Flag(bool),
}

impl Value {
    /// An empty text, reference or reference list counts as "unset" for
    /// default-preset purposes.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Text(s) => s.is_empty(),
            Value::Reference(id) => id.is_empty(),
            Value::References(ids) => ids.is_empty(),
            Value::Timestamp(_) | Value::Flag(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&str> {
        match self {
            Value::Reference(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_references(&self) -> Option<&[RecordId]> {
        match self {
            Value::References(ids) => Some(ids),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Value::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{}", s),
            Value::Reference(id) => write!(f, "{}", id),
            Value::References(ids) => write!(f, "[{}]", ids.join(", ")),
            Value::Timestamp(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Value::Flag(b) => write!(f, "{}", b),
        }
    }
}
