//! User preferences behind an injectable key-value store.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryPreferences;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FilePreferences;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Preference errors.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Preference error: {0}")]
    Other(String),
}

/// Result type for preference operations.
pub type PreferenceResult<T> = Result<T, PreferenceError>;

/// Key for the pinned palette categories.
pub const PINNED_CATEGORIES_KEY: &str = "pinned_categories";
/// Key for the recently used tools.
pub const RECENT_TOOLS_KEY: &str = "recent_tools";
/// Key for the onboarding flag.
pub const ONBOARDING_KEY: &str = "onboarding_complete";
/// How many recent tools are remembered.
pub const MAX_RECENT_TOOLS: usize = 8;

/// Backend for preference values.
///
/// Implementations keep JSON values keyed by name.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> PreferenceResult<Option<Value>>;

    fn set(&self, key: &str, value: Value) -> PreferenceResult<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> PreferenceResult<()>;

    /// All stored keys, sorted.
    fn keys(&self) -> PreferenceResult<Vec<String>>;
}

/// Typed access to the editor's preferences.
pub struct Preferences<S: PreferenceStore> {
    store: S,
}

impl<S: PreferenceStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn get_as<T: DeserializeOwned>(&self, key: &str) -> PreferenceResult<Option<T>> {
        match self.store.get(key)? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| PreferenceError::Serialization(format!("{}: {}", key, e))),
            None => Ok(None),
        }
    }

    fn set_as<T: Serialize>(&self, key: &str, value: &T) -> PreferenceResult<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| PreferenceError::Serialization(format!("{}: {}", key, e)))?;
        self.store.set(key, value)
    }

    pub fn pinned_categories(&self) -> PreferenceResult<Vec<String>> {
        Ok(self.get_as(PINNED_CATEGORIES_KEY)?.unwrap_or_default())
    }

    /// Pin a category. Returns `false` if it was already pinned.
    pub fn pin_category(&self, category: &str) -> PreferenceResult<bool> {
        let mut pinned = self.pinned_categories()?;
        if pinned.iter().any(|c| c == category) {
            return Ok(false);
        }
        pinned.push(category.to_string());
        self.set_as(PINNED_CATEGORIES_KEY, &pinned)?;
        Ok(true)
    }

    /// Unpin a category. Returns `false` if it was not pinned.
    pub fn unpin_category(&self, category: &str) -> PreferenceResult<bool> {
        let mut pinned = self.pinned_categories()?;
        let before = pinned.len();
        pinned.retain(|c| c != category);
        if pinned.len() == before {
            return Ok(false);
        }
        self.set_as(PINNED_CATEGORIES_KEY, &pinned)?;
        Ok(true)
    }

    /// Recently used tools, most recent first.
    pub fn recent_tools(&self) -> PreferenceResult<Vec<String>> {
        Ok(self.get_as(RECENT_TOOLS_KEY)?.unwrap_or_default())
    }

    /// Record a tool use, moving it to the front.
    pub fn record_tool_use(&self, tool: &str) -> PreferenceResult<()> {
        let mut recent = self.recent_tools()?;
        recent.retain(|t| t != tool);
        recent.insert(0, tool.to_string());
        recent.truncate(MAX_RECENT_TOOLS);
        self.set_as(RECENT_TOOLS_KEY, &recent)
    }

    pub fn onboarding_complete(&self) -> PreferenceResult<bool> {
        Ok(self.get_as(ONBOARDING_KEY)?.unwrap_or(false))
    }

    pub fn set_onboarding_complete(&self, complete: bool) -> PreferenceResult<()> {
        self.set_as(ONBOARDING_KEY, &complete)
    }

    /// Forget everything.
    pub fn reset(&self) -> PreferenceResult<()> {
        for key in self.store.keys()? {
            self.store.remove(&key)?;
        }
        Ok(())
    }
}
