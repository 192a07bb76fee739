//! Storage double with injectable failures.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::adapters::InMemoryStorage;
use crate::traits::{KeyValueStorage, StorageError};

/// In-memory storage whose operations can be made to fail.
///
/// Failing `remove_item`/`clear` calls leave the data untouched, so tests
/// can tell an attempted cleanup from a successful one via the call counters.
#[derive(Debug, Clone, Default)]
pub struct FlakyStorage {
    inner: InMemoryStorage,
    remove_should_fail: Arc<AtomicBool>,
    clear_should_fail: Arc<AtomicBool>,
    remove_calls: Arc<AtomicUsize>,
    clear_calls: Arc<AtomicUsize>,
}

impl FlakyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing storage.
    pub fn wrapping(inner: InMemoryStorage) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub fn set_remove_should_fail(&self, should_fail: bool) {
        self.remove_should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn set_clear_should_fail(&self, should_fail: bool) {
        self.clear_should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn remove_calls(&self) -> usize {
        self.remove_calls.load(Ordering::SeqCst)
    }

    pub fn clear_calls(&self) -> usize {
        self.clear_calls.load(Ordering::SeqCst)
    }

    /// The wrapped storage, for direct inspection.
    pub fn inner(&self) -> &InMemoryStorage {
        &self.inner
    }
}

#[async_trait]
impl KeyValueStorage for FlakyStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        if self.remove_should_fail.load(Ordering::SeqCst) {
            return Err(StorageError::WriteFailed("Mock remove failure".to_string()));
        }
        self.inner.remove_item(key).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        if self.clear_should_fail.load(Ordering::SeqCst) {
            return Err(StorageError::ClearFailed("Mock clear failure".to_string()));
        }
        self.inner.clear().await
    }
}
