//! Preference stores for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::DomainError;
use crate::repositories::PreferenceStore;

#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn with(entries: &[(&str, &str)]) -> Self {
        let store = Self::default();
        for (k, v) in entries {
            store.set(k, v).unwrap();
        }
        store
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Reads nothing, rejects every write.
pub struct FailingStore;

impl PreferenceStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, DomainError> {
        Ok(None)
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), DomainError> {
        Err(DomainError::StorageError(format!("read-only: {}", key)))
    }

    fn remove(&self, key: &str) -> Result<(), DomainError> {
        Err(DomainError::StorageError(format!("read-only: {}", key)))
    }
}
