//! File-backed key-value storage adapter.
//!
//! Persists the per-tab storage map as JSON in `~/.credportal/storage.json`
//! so the session token survives between invocations of the binary.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::traits::{KeyValueStorage, StorageError};

/// The storage directory name.
const STORAGE_DIR: &str = ".credportal";

/// The storage file name.
const STORAGE_FILE: &str = "storage.json";

/// File-based storage provider.
///
/// Every operation reads the file, applies the change and writes it back.
/// A missing file is an empty store. The mutex serializes every access
/// within one process, so a reader never sees a half-written file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Create a storage rooted in the user's home directory.
    pub fn new() -> Result<Self, StorageError> {
        let home = dirs::home_dir()
            .ok_or_else(|| StorageError::Other("Failed to determine home directory".to_string()))?;
        Ok(Self::with_path(home.join(STORAGE_DIR).join(STORAGE_FILE)))
    }

    /// Create a storage backed by an explicit file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Get the path to the storage file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let file = File::open(&self.path).map_err(|e| StorageError::ReadFailed(e.to_string()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StorageError::WriteFailed(e.to_string()))?;
            }
        }

        let file =
            File::create(&self.path).map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, map)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| StorageError::WriteFailed(e.to_string()))
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>, StorageError> {
        self.lock
            .lock()
            .map_err(|_| StorageError::Other("storage lock poisoned".to_string()))
    }

    fn update<F>(&self, f: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = self.guard()?;
        let mut map = self.read_map()?;
        f(&mut map);
        self.write_map(&map)
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.guard()?;
        Ok(self.read_map()?.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|map| {
            map.insert(key.to_string(), value.to_string());
        })
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|map| {
            map.remove(key);
        })
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.guard()?;
        if !self.path.exists() {
            return Ok(());
        }
        fs::remove_file(&self.path).map_err(|e| StorageError::ClearFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn create_test_storage(temp_dir: &TempDir) -> FileStorage {
        FileStorage::with_path(temp_dir.path().join(".credportal").join("storage.json"))
    }

    #[test]
    fn test_file_storage_new() {
        // This test depends on having a home directory
        let storage = FileStorage::new().unwrap();
        assert!(storage.path().ends_with("storage.json"));
    }

    #[tokio::test]
    async fn test_get_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_test_storage(&temp_dir);
        assert_eq!(storage.get_item("blockchain-sessionkey").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_creates_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_test_storage(&temp_dir);
        assert!(!storage.path().parent().unwrap().exists());

        storage.set_item("blockchain-sessionkey", "tok").await.unwrap();

        assert!(storage.path().exists());
        assert_eq!(
            storage.get_item("blockchain-sessionkey").await.unwrap(),
            Some("tok".to_string())
        );
    }

    #[tokio::test]
    async fn test_remove_keeps_other_keys() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_test_storage(&temp_dir);
        storage.set_item("a", "1").await.unwrap();
        storage.set_item("b", "2").await.unwrap();

        storage.remove_item("a").await.unwrap();

        assert_eq!(storage.get_item("a").await.unwrap(), None);
        assert_eq!(storage.get_item("b").await.unwrap(), Some("2".to_string()));
    }

    #[tokio::test]
    async fn test_clear_twice() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_test_storage(&temp_dir);
        storage.set_item("a", "1").await.unwrap();

        storage.clear().await.unwrap();
        storage.clear().await.unwrap();

        assert!(!storage.path().exists());
        assert_eq!(storage.get_item("a").await.unwrap(), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_reads_never_see_a_partial_write() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Arc::new(create_test_storage(&temp_dir));
        storage.set_item("blockchain-sessionkey", "tok-0").await.unwrap();

        let writer = {
            let storage = storage.clone();
            tokio::spawn(async move {
                for i in 1..200 {
                    let value = format!("tok-{}", i);
                    storage.set_item("blockchain-sessionkey", &value).await.unwrap();
                }
            })
        };
        let reader = {
            let storage = storage.clone();
            tokio::spawn(async move {
                for _ in 0..200 {
                    let value = storage.get_item("blockchain-sessionkey").await.unwrap();
                    assert!(value.unwrap().starts_with("tok-"));
                }
            })
        };

        writer.await.unwrap();
        reader.await.unwrap();
        assert_eq!(
            storage.get_item("blockchain-sessionkey").await.unwrap(),
            Some("tok-199".to_string())
        );
    }

    #[tokio::test]
    async fn test_invalid_json_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_test_storage(&temp_dir);
        fs::create_dir_all(storage.path().parent().unwrap()).unwrap();
        fs::write(storage.path(), "not valid json").unwrap();

        let result = storage.get_item("a").await;
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }
}
