//! Session token storage.
//!
//! The token is an opaque string kept under one fixed key. Nothing here
//! tracks expiry: an expired token is only discovered when the server
//! answers 401.

use std::sync::Arc;

use crate::config::AUTH_KEY_TOKEN_SESSION;
use crate::traits::{KeyValueStorage, StorageError};

#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl SessionStore {
    /// Store the token under the default `blockchain-sessionkey` key.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_key(storage, AUTH_KEY_TOKEN_SESSION)
    }

    pub fn with_key(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub async fn set_session_key(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set_item(&self.key, token).await
    }

    /// The stored token. An empty string counts as no token.
    pub async fn get_session_key(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .storage
            .get_item(&self.key)
            .await?
            .filter(|token| !token.is_empty()))
    }

    pub async fn remove_session_key(&self) -> Result<(), StorageError> {
        self.storage.remove_item(&self.key).await
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").field("key", &self.key).finish()
    }
}
