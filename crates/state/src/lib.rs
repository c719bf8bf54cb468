//! Persisted program state.
//!
//! The sweep keeps two kinds of state between invocations:
//!
//! - string properties behind [`KeyValueStore`] (the scan progress cursor);
//! - scheduled triggers behind [`TriggerRegistry`], registered by whatever
//!   schedules the program and cancelled on reset.
//!
//! [`FileStateStore`] keeps both in one JSON document; [`MemoryStateStore`]
//! is the in-process equivalent.

pub mod file;
pub mod memory;

use serde::{Deserialize, Serialize};

pub use file::FileStateStore;
pub use memory::MemoryStateStore;

/// Errors from state persistence.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("State I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("State file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// String properties addressed by fixed key names.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StateError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StateError>;
    /// Remove `key`; removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), StateError>;
}

/// A scheduled invocation registered for this program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    pub id: String,
    /// Command the trigger runs.
    pub handler: String,
    /// Free-form schedule description, e.g. a cron expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
}

/// Scheduled triggers belonging to this program.
pub trait TriggerRegistry: Send + Sync {
    fn list_triggers(&self) -> Result<Vec<Trigger>, StateError>;
    /// Cancel one trigger; cancelling an unknown id is not an error.
    fn delete_trigger(&self, id: &str) -> Result<(), StateError>;
}

/// Properties and triggers as persisted.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDocument {
    #[serde(default)]
    pub properties: std::collections::BTreeMap<String, String>,
    #[serde(default)]
    pub triggers: Vec<Trigger>,
}
