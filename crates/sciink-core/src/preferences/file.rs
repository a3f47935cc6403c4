//! JSON-file preference store for native platforms.

use super::{PreferenceError, PreferenceResult, PreferenceStore};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Preferences kept in a single JSON object on disk.
///
/// The file is read once on open and rewritten after every change.
pub struct FilePreferences {
    path: PathBuf,
    values: RwLock<BTreeMap<String, Value>>,
}

impl FilePreferences {
    /// Open the store at `path`. A missing file starts out empty.
    pub fn open(path: PathBuf) -> PreferenceResult<Self> {
        let values = if path.exists() {
            let json = fs::read_to_string(&path).map_err(|e| {
                PreferenceError::Io(format!("Failed to read {}: {}", path.display(), e))
            })?;
            let values: BTreeMap<String, Value> = serde_json::from_str(&json).map_err(|e| {
                PreferenceError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
            })?;
            log::info!("Loaded {} preferences from {}", values.len(), path.display());
            values
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    /// Open the store in the default location.
    ///
    /// On Linux: `~/.config/sciink/preferences.json`
    /// On Windows: `%APPDATA%\sciink\preferences.json`
    pub fn default_location() -> PreferenceResult<Self> {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| PreferenceError::Io("Could not determine config directory".to_string()))?;
        Self::open(base.join("sciink").join("preferences.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, Value>) -> PreferenceResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                PreferenceError::Io(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        let json = serde_json::to_string_pretty(values)
            .map_err(|e| PreferenceError::Serialization(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| {
            PreferenceError::Io(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

fn lock_error(e: impl std::fmt::Display) -> PreferenceError {
    PreferenceError::Other(format!("Lock error: {}", e))
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> PreferenceResult<Option<Value>> {
        let values = self.values.read().map_err(lock_error)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> PreferenceResult<()> {
        let mut values = self.values.write().map_err(lock_error)?;
        let mut next = values.clone();
        next.insert(key.to_string(), value);
        self.persist(&next)?;
        *values = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> PreferenceResult<()> {
        let mut values = self.values.write().map_err(lock_error)?;
        if values.contains_key(key) {
            let mut next = values.clone();
            next.remove(key);
            self.persist(&next)?;
            *values = next;
        }
        Ok(())
    }

    fn keys(&self) -> PreferenceResult<Vec<String>> {
        let values = self.values.read().map_err(lock_error)?;
        Ok(values.keys().cloned().collect())
    }
}
