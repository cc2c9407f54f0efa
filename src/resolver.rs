// File: ./src/resolver.rs
// Turns a command line's raw value into a typed property value.
use crate::dates;
use crate::schema::PropertyKind;
use crate::store::NameLookup;
use crate::value::{RecordId, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("invalid date '{0}' (expected yyyy[-mm[-dd[ hh:mm[:ss]]]], mm-dd, hh:mm[:ss] or a [0-9smhdwy]+ offset)")]
    InvalidDate(String),
    #[error("no {class} named '{name}'")]
    UnresolvedName { class: String, name: String },
    #[error("invalid boolean '{0}' (expected true/1 or false/0)")]
    InvalidFlag(String),
    #[error("'{0}' values cannot be resolved one at a time")]
    UnsupportedKind(String),
}

/// Resolve a single-valued command. Multi-reference commands carry edit
/// sigils and merge against the current list; they go through
/// [`ListEdit`] instead, and land here only by mistake.
pub fn resolve(
    kind: &PropertyKind,
    raw: &str,
    lookup: &dyn NameLookup,
) -> Result<Value, ResolveError> {
    match kind {
        PropertyKind::Text => Ok(Value::Text(raw.to_string())),
        PropertyKind::Boolean => match raw.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Value::Flag(true)),
            "false" | "0" => Ok(Value::Flag(false)),
            _ => Err(ResolveError::InvalidFlag(raw.to_string())),
        },
        PropertyKind::Date => dates::parse_date_input(raw)
            .map(Value::Timestamp)
            .ok_or_else(|| ResolveError::InvalidDate(raw.to_string())),
        PropertyKind::SingleReference(class) => {
            // First match wins; the lookup service's own order decides.
            match lookup.lookup(class, raw).into_iter().next() {
                Some(id) => Ok(Value::Reference(id)),
                None => Err(ResolveError::UnresolvedName {
                    class: class.clone(),
                    name: raw.to_string(),
                }),
            }
        }
        PropertyKind::MultiReference(_) => {
            Err(ResolveError::UnsupportedKind(kind.to_string()))
        }
    }
}

/// A parsed multi-reference command: `+name` adds, `-name` removes, a
/// bare name sets. Names that resolve to nothing are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEdit {
    pub to_add: Vec<RecordId>,
    pub to_remove: Vec<RecordId>,
    pub to_set: Vec<RecordId>,
}

impl ListEdit {
    /// Split a raw value on commas and resolve each trimmed token.
    pub fn parse(raw: &str, class: &str, lookup: &dyn NameLookup) -> Self {
        let mut edit = Self::default();
        for token in raw.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let (bucket, name) = if let Some(rest) = token.strip_prefix('+') {
                (&mut edit.to_add, rest)
            } else if let Some(rest) = token.strip_prefix('-') {
                (&mut edit.to_remove, rest)
            } else {
                (&mut edit.to_set, token)
            };
            let mut ids = lookup.lookup(class, name);
            if ids.is_empty() {
                log::debug!("ignoring unknown {} '{}'", class, name);
                continue;
            }
            bucket.append(&mut ids);
        }
        edit
    }

    /// An edit with any add or remove entries adjusts the current list;
    /// one made of bare names alone replaces it.
    pub fn is_incremental(&self) -> bool {
        !self.to_add.is_empty() || !self.to_remove.is_empty()
    }

    /// Apply the edit to the current list. Removing an ID that is not
    /// present is a no-op. The result is deduplicated and sorted so
    /// writes are deterministic.
    pub fn merge_into(&self, current: &[RecordId]) -> Vec<RecordId> {
        let mut result: Vec<RecordId> = if self.is_incremental() {
            let mut kept: Vec<RecordId> = current
                .iter()
                .filter(|id| !self.to_remove.contains(*id))
                .cloned()
                .collect();
            kept.extend(self.to_add.iter().cloned());
            kept.extend(self.to_set.iter().cloned());
            kept
        } else {
            self.to_set.clone()
        };
        result.sort();
        result.dedup();
        result
    }
}
