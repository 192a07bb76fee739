//! Session state: the persisted token, the transient per-tab storage and
//! the page lifecycle, bundled so they can be handed to the client factory
//! and the interceptors instead of being reached for globally.

mod store;

pub use store::SessionStore;

use std::sync::Arc;

use crate::traits::{KeyValueStorage, PageLifecycle};

/// What a best-effort cleanup managed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupReport {
    pub transient_cleared: bool,
    pub token_removed: bool,
}

impl CleanupReport {
    pub fn is_complete(&self) -> bool {
        self.transient_cleared && self.token_removed
    }
}

#[derive(Clone)]
pub struct SessionContext {
    store: SessionStore,
    transient: Arc<dyn KeyValueStorage>,
    page: Arc<dyn PageLifecycle>,
}

impl SessionContext {
    pub fn new(
        store: SessionStore,
        transient: Arc<dyn KeyValueStorage>,
        page: Arc<dyn PageLifecycle>,
    ) -> Self {
        Self {
            store,
            transient,
            page,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn page(&self) -> &dyn PageLifecycle {
        self.page.as_ref()
    }

    /// Clear the transient storage and remove the session token.
    ///
    /// Each step runs even if the other one fails; failures are logged and
    /// reported, never returned. Running it again on empty storage is a no-op.
    pub async fn clear(&self) -> CleanupReport {
        let transient_cleared = match self.transient.clear().await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Error while resetting session storage: {}", e);
                false
            }
        };

        let token_removed = match self.store.remove_session_key().await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Error while removing session token: {}", e);
                false
            }
        };

        CleanupReport {
            transient_cleared,
            token_removed,
        }
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{FlakyStorage, ReloadCounter};
    use crate::adapters::InMemoryStorage;

    fn context(persisted: &FlakyStorage, transient: &FlakyStorage) -> SessionContext {
        SessionContext::new(
            SessionStore::new(Arc::new(persisted.clone())),
            Arc::new(transient.clone()),
            Arc::new(ReloadCounter::new()),
        )
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let persisted =
            FlakyStorage::wrapping(InMemoryStorage::with_items([("blockchain-sessionkey", "t")]));
        let transient = FlakyStorage::wrapping(InMemoryStorage::with_items([("draft", "x")]));
        let ctx = context(&persisted, &transient);

        let report = ctx.clear().await;

        assert!(report.is_complete());
        assert!(persisted.inner().is_empty());
        assert!(transient.inner().is_empty());
    }

    #[tokio::test]
    async fn test_clear_twice_is_idempotent() {
        let persisted =
            FlakyStorage::wrapping(InMemoryStorage::with_items([("blockchain-sessionkey", "t")]));
        let transient = FlakyStorage::new();
        let ctx = context(&persisted, &transient);

        assert!(ctx.clear().await.is_complete());
        assert!(ctx.clear().await.is_complete());
        assert!(persisted.inner().is_empty());
        assert!(transient.inner().is_empty());
    }

    #[tokio::test]
    async fn test_transient_failure_still_removes_token() {
        let persisted =
            FlakyStorage::wrapping(InMemoryStorage::with_items([("blockchain-sessionkey", "t")]));
        let transient = FlakyStorage::new();
        transient.set_clear_should_fail(true);
        let ctx = context(&persisted, &transient);

        let report = ctx.clear().await;

        assert!(!report.transient_cleared);
        assert!(report.token_removed);
        assert!(persisted.inner().is_empty());
    }

    #[tokio::test]
    async fn test_token_failure_still_clears_transient() {
        let persisted =
            FlakyStorage::wrapping(InMemoryStorage::with_items([("blockchain-sessionkey", "t")]));
        persisted.set_remove_should_fail(true);
        let transient = FlakyStorage::wrapping(InMemoryStorage::with_items([("draft", "x")]));
        let ctx = context(&persisted, &transient);

        let report = ctx.clear().await;

        assert!(report.transient_cleared);
        assert!(!report.token_removed);
        assert_eq!(persisted.remove_calls(), 1);
        assert!(transient.inner().is_empty());
    }
}
