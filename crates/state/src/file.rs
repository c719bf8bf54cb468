//! JSON-file state store.
//!
//! The whole document is read before and written after every mutation, so
//! edits made by other tools between invocations (e.g. registering a
//! trigger) are picked up. A missing file reads as empty state.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::{KeyValueStore, StateDocument, StateError, Trigger, TriggerRegistry};

/// State persisted to a single JSON file.
#[derive(Debug)]
pub struct FileStateStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current document.
    pub fn load(&self) -> Result<StateDocument, StateError> {
        if !self.path.exists() {
            return Ok(StateDocument::default());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(StateDocument::default());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, doc: &StateDocument) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(doc)?)?;
        Ok(())
    }

    fn update<T>(&self, f: impl FnOnce(&mut StateDocument) -> T) -> Result<T, StateError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut doc = self.load()?;
        let out = f(&mut doc);
        self.save(&doc)?;
        Ok(out)
    }
}

impl KeyValueStore for FileStateStore {
    fn get(&self, key: &str) -> Result<Option<String>, StateError> {
        Ok(self.load()?.properties.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StateError> {
        self.update(|doc| {
            doc.properties.insert(key.to_string(), value.to_string());
        })
    }

    fn delete(&self, key: &str) -> Result<(), StateError> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|doc| {
            doc.properties.remove(key);
        })
    }
}

impl TriggerRegistry for FileStateStore {
    fn list_triggers(&self) -> Result<Vec<Trigger>, StateError> {
        Ok(self.load()?.triggers)
    }

    fn delete_trigger(&self, id: &str) -> Result<(), StateError> {
        let removed = self.update(|doc| {
            let before = doc.triggers.len();
            doc.triggers.retain(|t| t.id != id);
            before - doc.triggers.len()
        })?;
        if removed > 0 {
            tracing::debug!(trigger = id, "Trigger removed from state file");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
