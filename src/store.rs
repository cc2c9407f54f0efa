// File: ./src/store.rs
/*! Tracker storage interfaces and an in-memory implementation.

Hooks never reach for ambient state: everything they touch comes in as
`&mut dyn Tracker`, which bundles the three collaborator surfaces of a
host tracker (name lookup, record access, schema). `MemoryTracker` is a
small concrete tracker backed by hash maps, used by the test suite and
by hosts that want to drive the hooks without a real database.
*/

use crate::schema::{PropertyKind, Schema};
use crate::value::{RecordId, Value, Values};
use std::collections::{BTreeMap, HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no class named '{0}'")]
    NoSuchClass(String),
    #[error("no {class} record with id {id}")]
    NoSuchRecord { class: String, id: RecordId },
}

/// Resolves a record name to IDs via the class's key property, in the
/// store's own deterministic order (creation order here).
pub trait NameLookup {
    fn lookup(&self, class: &str, name: &str) -> Vec<RecordId>;
}

pub trait RecordStore {
    /// `Ok(None)` means the record exists but the property is unset.
    fn get(&self, class: &str, id: &str, property: &str) -> Result<Option<Value>, StoreError>;
    fn set(&mut self, class: &str, id: &str, property: &str, value: Value)
    -> Result<(), StoreError>;
    fn create(&mut self, class: &str, values: Values) -> Result<RecordId, StoreError>;
    /// Retired records keep their data but stop resolving by name.
    fn retire(&mut self, class: &str, id: &str) -> Result<(), StoreError>;
}

pub trait SchemaRegistry {
    fn properties_of(&self, class: &str) -> Option<&HashMap<String, PropertyKind>>;
}

/// The full host surface a hook sees.
pub trait Tracker: NameLookup + RecordStore + SchemaRegistry {}
impl<T: NameLookup + RecordStore + SchemaRegistry> Tracker for T {}

// --- In-memory implementation ---

#[derive(Debug, Default)]
struct ClassData {
    next_id: u64,
    records: BTreeMap<u64, Values>,
    retired: HashSet<u64>,
}

#[derive(Debug)]
pub struct MemoryTracker {
    schema: Schema,
    classes: HashMap<String, ClassData>,
}

impl MemoryTracker {
    pub fn new(schema: Schema) -> Self {
        let classes = schema
            .classes
            .keys()
            .map(|name| {
                (
                    name.clone(),
                    ClassData {
                        next_id: 1,
                        ..ClassData::default()
                    },
                )
            })
            .collect();
        Self { schema, classes }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Seed one row of a lookup class (a status, a topic, ...) by its
    /// key property.
    pub fn create_named(&mut self, class: &str, name: &str) -> Result<RecordId, StoreError> {
        let key = self.schema.key_of(class).unwrap_or("name").to_string();
        self.create(class, Values::from([(key, Value::Text(name.to_string()))]))
    }

    pub fn is_retired(&self, class: &str, id: &str) -> bool {
        match (self.classes.get(class), id.parse::<u64>()) {
            (Some(data), Ok(key)) => data.retired.contains(&key),
            _ => false,
        }
    }

    fn class(&self, class: &str) -> Result<&ClassData, StoreError> {
        self.classes
            .get(class)
            .ok_or_else(|| StoreError::NoSuchClass(class.to_string()))
    }

    fn class_mut(&mut self, class: &str) -> Result<&mut ClassData, StoreError> {
        self.classes
            .get_mut(class)
            .ok_or_else(|| StoreError::NoSuchClass(class.to_string()))
    }

    fn record_key(class: &str, id: &str) -> Result<u64, StoreError> {
        id.parse().map_err(|_| StoreError::NoSuchRecord {
            class: class.to_string(),
            id: id.to_string(),
        })
    }
}

impl NameLookup for MemoryTracker {
    fn lookup(&self, class: &str, name: &str) -> Vec<RecordId> {
        let Some(data) = self.classes.get(class) else {
            return Vec::new();
        };
        let Some(key) = self.schema.key_of(class) else {
            return Vec::new();
        };
        data.records
            .iter()
            .filter(|(id, _)| !data.retired.contains(id))
            .filter(|(_, values)| values.get(key).and_then(Value::as_text) == Some(name))
            .map(|(id, _)| id.to_string())
            .collect()
    }
}

impl RecordStore for MemoryTracker {
    fn get(&self, class: &str, id: &str, property: &str) -> Result<Option<Value>, StoreError> {
        let data = self.class(class)?;
        let key = Self::record_key(class, id)?;
        let record = data
            .records
            .get(&key)
            .ok_or_else(|| StoreError::NoSuchRecord {
                class: class.to_string(),
                id: id.to_string(),
            })?;
        Ok(record.get(property).cloned())
    }

    fn set(
        &mut self,
        class: &str,
        id: &str,
        property: &str,
        value: Value,
    ) -> Result<(), StoreError> {
        let key = Self::record_key(class, id)?;
        let data = self.class_mut(class)?;
        let record = data
            .records
            .get_mut(&key)
            .ok_or_else(|| StoreError::NoSuchRecord {
                class: class.to_string(),
                id: id.to_string(),
            })?;
        record.insert(property.to_string(), value);
        Ok(())
    }

    fn create(&mut self, class: &str, values: Values) -> Result<RecordId, StoreError> {
        let data = self.class_mut(class)?;
        let id = data.next_id;
        data.next_id += 1;
        data.records.insert(id, values);
        Ok(id.to_string())
    }

    fn retire(&mut self, class: &str, id: &str) -> Result<(), StoreError> {
        let key = Self::record_key(class, id)?;
        let data = self.class_mut(class)?;
        if !data.records.contains_key(&key) {
            return Err(StoreError::NoSuchRecord {
                class: class.to_string(),
                id: id.to_string(),
            });
        }
        data.retired.insert(key);
        Ok(())
    }
}

impl SchemaRegistry for MemoryTracker {
    fn properties_of(&self, class: &str) -> Option<&HashMap<String, PropertyKind>> {
        self.schema.properties_of(class)
    }
}
