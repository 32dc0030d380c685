//! Browser LocalStorage backend

use super::{CHECKPOINT_KEY, CheckpointRecord, CheckpointStore, PersistenceError};

/// Checkpoint record kept in `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, PersistenceError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| PersistenceError::Unavailable("localStorage".to_string()))
    }

    fn js_error(e: wasm_bindgen::JsValue) -> PersistenceError {
        PersistenceError::Unavailable(format!("{e:?}"))
    }
}

impl CheckpointStore for LocalStorageStore {
    fn save(&mut self, record: &CheckpointRecord) -> Result<(), PersistenceError> {
        Self::storage()?
            .set_item(CHECKPOINT_KEY, &record.to_json()?)
            .map_err(Self::js_error)
    }

    fn load(&self) -> Result<Option<CheckpointRecord>, PersistenceError> {
        let raw = Self::storage()?
            .get_item(CHECKPOINT_KEY)
            .map_err(Self::js_error)?;
        raw.as_deref().map(CheckpointRecord::from_json).transpose()
    }

    fn remove(&mut self) -> Result<(), PersistenceError> {
        Self::storage()?
            .remove_item(CHECKPOINT_KEY)
            .map_err(Self::js_error)
    }
}
