//! Mock configurations for test fixtures.
//!
//! Re-exports the doubles from `credportal::adapters::mock` and adds
//! builders for the common setups.

pub use credportal::adapters::mock::{
    FlakyStorage, MapTranslator, MockHttpClient, MockResponse, RecordingNotifier, ReloadCounter,
};
pub use credportal::adapters::InMemoryStorage;
pub use credportal::traits::{Headers, HttpClient, HttpError, Response};

/// Configuration for setting up mock HTTP responses.
pub struct MockHttpConfig {
    client: MockHttpClient,
}

impl MockHttpConfig {
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Configures a JSON response with any status.
    pub fn with_json_response(self, url: &str, status: u16, json: serde_json::Value) -> Self {
        self.client.set_response(url, MockResponse::json(status, json));
        self
    }

    /// Configures a plain-text response with any status.
    pub fn with_text_response(self, url: &str, status: u16, body: &str) -> Self {
        self.client.set_response(url, MockResponse::status(status, body));
        self
    }

    /// Configures a transport error.
    #[allow(dead_code)]
    pub fn with_transport_error(self, url: &str, error: HttpError) -> Self {
        self.client.set_response(url, MockResponse::Error(error));
        self
    }

    /// Configures a default response for unmatched URLs.
    #[allow(dead_code)]
    pub fn with_default_status(self, status: u16, body: &str) -> Self {
        self.client
            .set_default_response(MockResponse::status(status, body));
        self
    }

    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for storage doubles.
pub struct MockStorageConfig {
    storage: FlakyStorage,
}

impl MockStorageConfig {
    pub fn new() -> Self {
        Self {
            storage: FlakyStorage::new(),
        }
    }

    /// Starts with the given entries.
    pub fn with_items(items: &[(&str, &str)]) -> Self {
        Self {
            storage: FlakyStorage::wrapping(InMemoryStorage::with_items(items.iter().copied())),
        }
    }

    /// Configures remove to fail.
    pub fn with_remove_failure(self) -> Self {
        self.storage.set_remove_should_fail(true);
        self
    }

    /// Configures clear to fail.
    pub fn with_clear_failure(self) -> Self {
        self.storage.set_clear_should_fail(true);
        self
    }

    pub fn build(self) -> FlakyStorage {
        self.storage
    }
}

impl Default for MockStorageConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credportal::traits::KeyValueStorage;

    #[tokio::test]
    async fn test_mock_http_with_default() {
        let client = MockHttpConfig::new().with_default_status(200, "OK").build();
        let response = client
            .get("https://any-url.example/anything", &Headers::new())
            .await
            .unwrap();
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_mock_storage_failures() {
        let storage = MockStorageConfig::with_items(&[("k", "v")])
            .with_remove_failure()
            .build();
        assert!(storage.remove_item("k").await.is_err());
        assert_eq!(storage.get_item("k").await.unwrap().as_deref(), Some("v"));
    }
}
