//! Mock implementations for testing.
//!
//! These doubles let the interceptor chain, the client factory and the
//! services be exercised without network access or a home directory.

pub mod http;
pub mod storage;
pub mod ui;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use storage::FlakyStorage;
pub use ui::{MapTranslator, RecordingNotifier, ReloadCounter};
