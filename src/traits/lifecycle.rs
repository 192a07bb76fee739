//! Page lifecycle trait.

/// Control over the hosting page.
pub trait PageLifecycle: Send + Sync {
    /// Discard all in-memory state and re-enter the unauthenticated flow.
    fn reload(&self);
}
