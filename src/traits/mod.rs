//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP transport (GET, POST, PUT, PATCH, DELETE)
//! - [`KeyValueStorage`] - Per-tab string storage for the session token and transient state
//! - [`NotificationSink`] - Destination for user-visible error messages
//! - [`Translator`] - Localization lookups with the key-as-miss convention
//! - [`PageLifecycle`] - Forced reload of the hosting page

pub mod http;
pub mod lifecycle;
pub mod notify;
pub mod storage;
pub mod translate;

pub use http::{Headers, HttpClient, HttpError, Method, Response};
pub use lifecycle::PageLifecycle;
pub use notify::NotificationSink;
pub use storage::{KeyValueStorage, StorageError};
pub use translate::Translator;
