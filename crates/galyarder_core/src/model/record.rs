//! Record model.
//!
//! # Responsibility
//! - Define one entity instance as an id plus a flat field map.
//! - Provide shallow-merge semantics used by store updates.
//!
//! # Invariants
//! - `id` is stable for the record lifetime and unique within a collection.
//! - Field names are flat keys; `contact.email` is a single key.

use crate::model::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Stable identifier of a record within its collection.
pub type RecordId = String;

/// Field name to value mapping of one record or draft.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// Generates a fresh record id.
pub fn new_record_id() -> RecordId {
    Uuid::new_v4().to_string()
}

/// One entity instance inside a domain collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(default)]
    pub fields: FieldMap,
}

impl Record {
    /// Creates a record with a freshly generated id.
    pub fn new(fields: FieldMap) -> Self {
        Self::with_id(new_record_id(), fields)
    }

    /// Creates a record with a caller-provided id.
    ///
    /// Used for seed data and rehydrated payloads.
    pub fn with_id(id: impl Into<RecordId>, fields: FieldMap) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Builder-style field setter for seeds and tests.
    pub fn field(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Returns the value of `name`, treating missing fields as empty.
    pub fn value(&self, name: &str) -> &FieldValue {
        self.fields.get(name).unwrap_or(&FieldValue::Empty)
    }

    /// Shallow-merges `patch` into this record.
    ///
    /// Every key in `patch` overwrites the current value; other keys stay.
    /// The id is never part of a patch.
    pub fn merge(&mut self, patch: FieldMap) {
        for (name, value) in patch {
            self.fields.insert(name, value);
        }
    }
}

/// Builds a field map from `(name, value)` pairs.
pub fn field_map<I, K, V>(pairs: I) -> FieldMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<FieldValue>,
{
    pairs
        .into_iter()
        .map(|(name, value)| (name.into(), value.into()))
        .collect()
}
