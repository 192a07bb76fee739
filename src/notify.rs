//! In-process notification queue.
//!
//! Holds the messages the interceptors push until the front end (the CLI
//! here) displays and drains them.

use std::sync::{Arc, Mutex};

use crate::traits::NotificationSink;

/// A queued error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
}

/// Shared notification queue. Clones see the same queue.
#[derive(Debug, Clone, Default)]
pub struct NotifyStore {
    queue: Arc<Mutex<Vec<Notification>>>,
}

impl NotifyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!("notification: {}", message);
        if let Ok(mut queue) = self.queue.lock() {
            queue.push(Notification { message });
        }
    }

    /// Snapshot of the queued notifications, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.queue.lock().map(|q| q.clone()).unwrap_or_default()
    }

    /// Remove and return every queued notification.
    pub fn drain(&self) -> Vec<Notification> {
        self.queue
            .lock()
            .map(|mut q| std::mem::take(&mut *q))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().map(|q| q.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationSink for NotifyStore {
    fn push_error(&self, message: &str) {
        NotifyStore::push_error(self, message);
    }
}
