//! JSON file backend

use std::io::ErrorKind;
use std::path::PathBuf;

use super::{CheckpointRecord, CheckpointStore, PersistenceError};

/// Checkpoint record kept in a single JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CheckpointStore for FileStore {
    fn save(&mut self, record: &CheckpointRecord) -> Result<(), PersistenceError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        // Write-then-rename so a crash never leaves half a record
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, record.to_json()?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<CheckpointRecord>, PersistenceError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => CheckpointRecord::from_json(&json).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn remove(&mut self) -> Result<(), PersistenceError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("ledge-runner-{}-{name}", std::process::id()))
            .join("checkpoint.json")
    }

    #[test]
    fn test_file_store_roundtrip_and_remove() {
        let path = scratch("roundtrip");
        let mut store = FileStore::new(&path);
        assert!(store.load().unwrap().is_none());

        let record = CheckpointRecord { x: 4160.0, y: 418.0 };
        store.save(&record).unwrap();
        assert_eq!(store.load().unwrap(), Some(record));

        store.remove().unwrap();
        assert!(store.load().unwrap().is_none());
        // Removing twice is fine
        store.remove().unwrap();

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_malformed() {
        let path = scratch("malformed");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(store.load(), Err(PersistenceError::Malformed(_))));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
