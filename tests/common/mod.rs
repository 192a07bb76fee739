//! Common test utilities for integration tests.
//!
//! # Example
//!
//! ```ignore
//! let harness = TestPortalBuilder::new()
//!     .with_token("tok")
//!     .with_http(MockHttpConfig::new().with_text_response(url, 500, "disk full").build())
//!     .build();
//! ```

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;

use credportal::api::ClientFactory;
use credportal::config::{AppConfig, AUTH_KEY_TOKEN_SESSION};
use credportal::interceptors::InterceptorContext;
use credportal::session::{SessionContext, SessionStore};

pub const API_URL: &str = "http://api.test";
pub const AUTH_URL: &str = "http://auth.test";

/// Translations used by most tests.
pub fn test_translator() -> MapTranslator {
    MapTranslator::new()
        .with("errors.networkError", "Network down")
        .with("errors.http400", "Bad request")
        .with("errors.http422", "Unprocessable")
        .with("errors.http500", "Server error")
}

/// A factory wired to doubles, with handles to inspect every side effect.
pub struct TestPortal {
    pub http: MockHttpClient,
    pub persisted: FlakyStorage,
    pub transient: FlakyStorage,
    pub notifier: RecordingNotifier,
    pub reloads: ReloadCounter,
    pub factory: ClientFactory,
}

#[derive(Default)]
pub struct TestPortalBuilder {
    token: Option<String>,
    http: Option<MockHttpClient>,
    persisted: Option<FlakyStorage>,
    transient: Option<FlakyStorage>,
    translator: Option<MapTranslator>,
    config: Option<AppConfig>,
}

impl TestPortalBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn with_http(mut self, http: MockHttpClient) -> Self {
        self.http = Some(http);
        self
    }

    #[allow(dead_code)]
    pub fn with_persisted(mut self, storage: FlakyStorage) -> Self {
        self.persisted = Some(storage);
        self
    }

    #[allow(dead_code)]
    pub fn with_transient(mut self, storage: FlakyStorage) -> Self {
        self.transient = Some(storage);
        self
    }

    #[allow(dead_code)]
    pub fn with_translator(mut self, translator: MapTranslator) -> Self {
        self.translator = Some(translator);
        self
    }

    #[allow(dead_code)]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> TestPortal {
        let persisted = self.persisted.unwrap_or_else(|| match &self.token {
            Some(token) => MockStorageConfig::with_items(&[(AUTH_KEY_TOKEN_SESSION, token.as_str())]).build(),
            None => MockStorageConfig::new().build(),
        });
        let transient = self
            .transient
            .unwrap_or_else(|| MockStorageConfig::with_items(&[("dashboard.filters", "{}")]).build());
        let http = self.http.unwrap_or_default();
        let notifier = RecordingNotifier::new();
        let reloads = ReloadCounter::new();
        let config = self.config.unwrap_or_else(|| {
            AppConfig::new()
                .with_api_url(API_URL)
                .with_auth_url(AUTH_URL)
        });

        let ctx = InterceptorContext::new(
            SessionContext::new(
                SessionStore::new(Arc::new(persisted.clone())),
                Arc::new(transient.clone()),
                Arc::new(reloads.clone()),
            ),
            Arc::new(notifier.clone()),
            Arc::new(self.translator.unwrap_or_else(test_translator)),
        );
        let factory = ClientFactory::new(config, Arc::new(http.clone()), ctx);

        TestPortal {
            http,
            persisted,
            transient,
            notifier,
            reloads,
            factory,
        }
    }
}
