//! Checkpoint persistence
//!
//! A single record, the coordinates of the active checkpoint, stored as JSON
//! under one key. Backends:
//! - `MemoryStore`: in-process (tests, headless runs)
//! - `FileStore`: JSON file on disk (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod file;
#[cfg(target_arch = "wasm32")]
mod web;

pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

/// Storage key of the checkpoint record
pub const CHECKPOINT_KEY: &str = "lastCheckpoint";

/// Persisted coordinates of the active checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckpointRecord {
    pub x: f32,
    pub y: f32,
}

impl CheckpointRecord {
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Storage failures
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data is not a checkpoint record
    #[error("Malformed checkpoint record: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Backend cannot be reached (no window, storage disabled)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Key-value access to the single checkpoint record
pub trait CheckpointStore: std::fmt::Debug {
    fn save(&mut self, record: &CheckpointRecord) -> Result<(), PersistenceError>;

    /// `Ok(None)` when nothing is stored
    fn load(&self) -> Result<Option<CheckpointRecord>, PersistenceError>;

    fn remove(&mut self) -> Result<(), PersistenceError>;
}

/// In-memory store holding the raw JSON, like a browser would
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with arbitrary (possibly malformed) contents
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }
}

impl CheckpointStore for MemoryStore {
    fn save(&mut self, record: &CheckpointRecord) -> Result<(), PersistenceError> {
        self.raw = Some(record.to_json()?);
        Ok(())
    }

    fn load(&self) -> Result<Option<CheckpointRecord>, PersistenceError> {
        self.raw
            .as_deref()
            .map(CheckpointRecord::from_json)
            .transpose()
    }

    fn remove(&mut self) -> Result<(), PersistenceError> {
        self.raw = None;
        Ok(())
    }
}
