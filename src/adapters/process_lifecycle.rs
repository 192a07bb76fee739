//! Page lifecycle for a command-line process.
//!
//! A process has no page to reload. A reload request is recorded so the
//! caller can drop what it holds and send the user back through login.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::traits::PageLifecycle;

#[derive(Debug, Clone, Default)]
pub struct ProcessLifecycle {
    reload_requested: Arc<AtomicBool>,
}

impl ProcessLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a reload was requested since the last [`ProcessLifecycle::acknowledge`].
    pub fn reload_requested(&self) -> bool {
        self.reload_requested.load(Ordering::SeqCst)
    }

    /// Reset the flag after the caller has handled the reload.
    pub fn acknowledge(&self) {
        self.reload_requested.store(false, Ordering::SeqCst);
    }
}

impl PageLifecycle for ProcessLifecycle {
    fn reload(&self) {
        tracing::warn!("Session invalidated, in-memory state must be discarded");
        self.reload_requested.store(true, Ordering::SeqCst);
    }
}
