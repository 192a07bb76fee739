//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileStorage`] - JSON-file storage for the persisted session token
//! - [`InMemoryStorage`] - Process-local storage for transient state
//! - [`ProcessLifecycle`] - Records reload requests for the binary
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses
//! - [`mock::FlakyStorage`] - Storage with injectable failures
//! - [`mock::RecordingNotifier`] - Captures pushed notifications
//! - [`mock::ReloadCounter`] - Counts reload requests
//! - [`mock::MapTranslator`] - Fixed translation table

pub mod file_storage;
pub mod memory_storage;
pub mod mock;
pub mod process_lifecycle;
pub mod reqwest_http;

pub use file_storage::FileStorage;
pub use memory_storage::InMemoryStorage;
pub use process_lifecycle::ProcessLifecycle;
pub use reqwest_http::ReqwestHttpClient;
