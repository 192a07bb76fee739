//! Notification sink trait.

/// Receiver of user-visible error messages.
///
/// The core only creates notifications. Display and dismissal belong to
/// whatever implements this trait (see [`NotifyStore`](crate::notify::NotifyStore)).
pub trait NotificationSink: Send + Sync {
    fn push_error(&self, message: &str);
}
