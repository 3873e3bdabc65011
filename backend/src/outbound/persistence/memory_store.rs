//! Process-local key-value store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use crate::domain::ports::{KeyValueStore, KeyValueStoreError, StorageKey};

/// Key-value store held in memory for the lifetime of the value.
///
/// Used by tests and by callers that do not need state to survive the
/// process.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<HashMap<StorageKey, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `value` already stored under `key`.
    #[must_use]
    pub fn with_entry(self, key: StorageKey, value: impl Into<String>) -> Self {
        self.lock_entries().insert(key, value.into());
        self
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<StorageKey, String>> {
        // A panic while holding the lock cannot leave a half-written entry.
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>, KeyValueStoreError> {
        let value = self.lock_entries().get(&key).cloned();
        debug!(%key, found = value.is_some(), "memory store read");
        Ok(value)
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<(), KeyValueStoreError> {
        debug!(%key, bytes = value.len(), "memory store write");
        self.lock_entries().insert(key, value.to_owned());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), KeyValueStoreError> {
        debug!(%key, "memory store remove");
        self.lock_entries().remove(&key);
        Ok(())
    }
}
