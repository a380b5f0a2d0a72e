//! Persistence of the chosen language

use crate::core::{Config, Error, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Trait for places the language preference can live
pub trait LanguageStore: Send + Sync {
    /// Read the saved language, if any
    fn load(&self) -> Result<Option<String>>;

    /// Save the language
    fn save(&self, language: &str) -> Result<()>;
}

/// Preference stored as a single entry of a TOML table on disk
pub struct FileLanguageStore {
    path: PathBuf,
    key: String,
}

impl FileLanguageStore {
    /// Store at an explicit file path, under the given entry name
    pub fn new(path: impl Into<PathBuf>, key: &str) -> Self {
        Self {
            path: path.into(),
            key: key.to_string(),
        }
    }

    /// Store in the application config directory
    pub fn in_config_dir(key: &str) -> Result<Self> {
        Ok(Self::new(Config::config_dir()?.join("preferences.toml"), key))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<toml::Table> {
        if !self.path.exists() {
            return Ok(toml::Table::new());
        }
        let content = fs::read_to_string(&self.path)?;
        toml::from_str::<toml::Table>(&content)
            .map_err(|e| Error::Storage(format!("Failed to parse {}: {}", self.path.display(), e)))
    }
}

impl LanguageStore for FileLanguageStore {
    fn load(&self) -> Result<Option<String>> {
        let table = self.read_table()?;
        Ok(table
            .get(&self.key)
            .and_then(|value| value.as_str())
            .map(str::to_string))
    }

    fn save(&self, language: &str) -> Result<()> {
        let mut table = self.read_table().unwrap_or_else(|e| {
            log::warn!("Discarding unreadable preferences: {}", e);
            toml::Table::new()
        });
        table.insert(self.key.clone(), toml::Value::String(language.to_string()));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string(&table).map_err(|e| Error::Serialization(e.to_string()))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Preference kept in memory only
pub struct MemoryLanguageStore {
    entries: Mutex<HashMap<String, String>>,
    key: String,
}

impl MemoryLanguageStore {
    pub fn new(key: &str) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            key: key.to_string(),
        }
    }

    /// Start with a saved language already present
    pub fn with_language(key: &str, language: &str) -> Self {
        let store = Self::new(key);
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), language.to_string());
        }
        store
    }
}

impl LanguageStore for MemoryLanguageStore {
    fn load(&self) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| Error::Storage("language store poisoned".to_string()))?;
        Ok(entries.get(&self.key).cloned())
    }

    fn save(&self, language: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| Error::Storage("language store poisoned".to_string()))?;
        entries.insert(self.key.clone(), language.to_string());
        Ok(())
    }
}
