use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Key holding the serialized identity of the logged in customer.
pub const USER_KEY: &str = "fractalis_user";

pub const STORAGE_FILE_NAME: &str = "storage.json";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Error while reading storage: {0}")]
    ReadingFile(String),
    #[error("Error while writing storage: {0}")]
    WritingFile(String),
}

/// A client-local key-value store.
pub trait Storage: std::fmt::Debug + Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage(Mutex<BTreeMap<String, String>>);

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut map = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        map.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut map = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        map.remove(key);
        Ok(())
    }
}

/// Stores every key in a single JSON object on disk.
///
/// Each mutation reads the whole file, applies the change and writes it back.
/// The file is removed once the last key is gone.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn in_directory(dir: &Path) -> Self {
        Self::new(dir.join(STORAGE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match std::fs::read(&self.path) {
            Ok(content) => serde_json::from_slice(&content)
                .map_err(|e| StorageError::ReadingFile(format!("Parsing storage file: {}", e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StorageError::ReadingFile(format!(
                "Reading storage file: {}",
                e
            ))),
        }
    }

    fn update<F>(&self, updater: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = self.read()?;
        updater(&mut map);

        if map.is_empty() {
            return match std::fs::remove_file(&self.path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
                    Err(StorageError::WritingFile(e.to_string()))
                }
                _ => Ok(()),
            };
        }

        let content = serde_json::to_vec_pretty(&map)
            .map_err(|e| StorageError::WritingFile(format!("Failed to serialize: {}", e)))?;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| StorageError::WritingFile(format!("Opening file: {}", e)))?;

        file.write_all(&content).map_err(|e| {
            tracing::warn!("failed to write to file: {:?}", e);
            StorageError::WritingFile(e.to_string())
        })
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read()?.remove(key))
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.update(|map| {
            map.insert(key.to_string(), value);
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|map| {
            map.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage() {
        let storage = MemoryStorage::default();
        assert_eq!(storage.get(USER_KEY).unwrap(), None);
        storage.set(USER_KEY, "value".to_string()).unwrap();
        assert_eq!(storage.get(USER_KEY).unwrap().as_deref(), Some("value"));
        storage.remove(USER_KEY).unwrap();
        assert_eq!(storage.get(USER_KEY).unwrap(), None);
    }

    #[test]
    fn file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::in_directory(dir.path());
        assert_eq!(storage.get(USER_KEY).unwrap(), None);

        storage.set(USER_KEY, "{}".to_string()).unwrap();
        storage.set("other", "1".to_string()).unwrap();
        assert!(storage.path().exists());

        let reopened = FileStorage::in_directory(dir.path());
        assert_eq!(reopened.get(USER_KEY).unwrap().as_deref(), Some("{}"));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("1"));

        reopened.remove(USER_KEY).unwrap();
        reopened.remove("other").unwrap();
        assert!(!reopened.path().exists());
        // Removing from a missing file is not an error.
        reopened.remove(USER_KEY).unwrap();
    }

    #[test]
    fn file_storage_corrupted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(STORAGE_FILE_NAME), b"not json").unwrap();
        let storage = FileStorage::in_directory(dir.path());
        assert!(matches!(
            storage.get(USER_KEY),
            Err(StorageError::ReadingFile(_))
        ));
    }
}
