//! In-process namespace storage.

use super::{Namespace, NamespaceStorage, PersistResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Map-backed storage for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryNamespaceStorage {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryNamespaceStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw payload, bypassing envelope encoding.
    pub fn insert_raw(&self, key: &str, payload: impl Into<String>) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), payload.into());
    }

    /// Returns the raw payload stored under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }
}

impl NamespaceStorage for MemoryNamespaceStorage {
    fn load_namespace(&self, key: &Namespace) -> PersistResult<Option<String>> {
        Ok(self.raw(key.as_str()))
    }

    fn save_namespace(&self, key: &Namespace, payload: &str) -> PersistResult<()> {
        self.insert_raw(key.as_str(), payload);
        Ok(())
    }
}
