//! In-memory preference store.

use super::{PreferenceError, PreferenceResult, PreferenceStore};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory preferences for tests and sessions that should not persist.
#[derive(Default)]
pub struct MemoryPreferences {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryPreferences {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> PreferenceError {
    PreferenceError::Other(format!("Lock error: {}", e))
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> PreferenceResult<Option<Value>> {
        let values = self.values.read().map_err(lock_error)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> PreferenceResult<()> {
        let mut values = self.values.write().map_err(lock_error)?;
        values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> PreferenceResult<()> {
        let mut values = self.values.write().map_err(lock_error)?;
        values.remove(key);
        Ok(())
    }

    fn keys(&self) -> PreferenceResult<Vec<String>> {
        let values = self.values.read().map_err(lock_error)?;
        let mut keys: Vec<String> = values.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
