use std::sync::{Mutex, MutexGuard};

use crate::{KeyValueStore, StateDocument, StateError, Trigger, TriggerRegistry};

/// State kept in process memory only.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    doc: Mutex<StateDocument>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `triggers`.
    pub fn with_triggers(triggers: Vec<Trigger>) -> Self {
        Self {
            doc: Mutex::new(StateDocument {
                triggers,
                ..StateDocument::default()
            }),
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> StateDocument {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, StateDocument> {
        self.doc.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStateStore {
    fn get(&self, key: &str) -> Result<Option<String>, StateError> {
        Ok(self.lock().properties.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StateError> {
        self.lock()
            .properties
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StateError> {
        self.lock().properties.remove(key);
        Ok(())
    }
}

impl TriggerRegistry for MemoryStateStore {
    fn list_triggers(&self) -> Result<Vec<Trigger>, StateError> {
        Ok(self.lock().triggers.clone())
    }

    fn delete_trigger(&self, id: &str) -> Result<(), StateError> {
        self.lock().triggers.retain(|t| t.id != id);
        Ok(())
    }
}
