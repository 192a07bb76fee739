//! Runtime configuration.
//!
//! Service endpoints and client identity come from the environment; locale
//! settings and storage keys are fixed constants.
//!
//! # Example
//!
//! ```ignore
//! use credportal::config::AppConfig;
//!
//! let config = AppConfig::from_env()
//!     .with_api_key("secret")
//!     .with_default_locale("en");
//! config.validate()?;
//! ```

use crate::error::{PortalError, PortalResult};

/// Identifier of this system towards the auth server.
pub const SYSTEM_NAME: &str = "blockchain";

/// Scope requested at the authorize endpoint.
pub const AUTH_SCOPE: &str = "vpm";

pub const AUTH_TYPE: &str = "VPM";

/// Storage key of the session token.
pub const AUTH_KEY_TOKEN_SESSION: &str = "blockchain-sessionkey";

const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_AUTH_URL: &str = "http://localhost:8081/idauth";
const DEFAULT_PUBLIC_URL: &str = "http://localhost:5173";
const DEFAULT_CLIENT_ID: &str = "blockchain-portal";
const DEFAULT_API_KEY: &str = "test";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the credential service (general API).
    pub api_url: String,
    /// Base URL of the auth server.
    pub auth_url: String,
    /// Public URL of the portal itself, used for the auth redirect.
    pub public_url: String,
    pub client_id: String,
    pub environment: String,
    /// Static key sent as `X-API-Key` to the general API.
    pub api_key: String,
    pub default_locale: String,
    pub supported_locales: Vec<String>,
    pub fallback_locale: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            public_url: DEFAULT_PUBLIC_URL.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            environment: "development".to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            default_locale: "lv".to_string(),
            supported_locales: vec!["lv".to_string(), "en".to_string()],
            fallback_locale: "en".to_string(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    pub fn with_public_url(mut self, url: impl Into<String>) -> Self {
        self.public_url = url.into();
        self
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    /// Build a config from `CREDPORTAL_*` environment variables.
    /// Unset variables keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        if let Some(v) = read("CREDPORTAL_SERVICE_URL") {
            config.api_url = v;
        }
        if let Some(v) = read("CREDPORTAL_AUTH_URL") {
            config.auth_url = v;
        }
        if let Some(v) = read("CREDPORTAL_PUBLIC_URL") {
            config.public_url = v;
        }
        if let Some(v) = read("CREDPORTAL_CLIENT_ID") {
            config.client_id = v;
        }
        if let Some(v) = read("CREDPORTAL_ENVIRONMENT") {
            config.environment = v;
        }
        if let Some(v) = read("CREDPORTAL_API_KEY") {
            config.api_key = v;
        }
        if let Some(v) = read("CREDPORTAL_LOCALE") {
            config.default_locale = v;
        }
        config
    }

    /// Check that the URLs parse and the default locale is supported.
    pub fn validate(&self) -> PortalResult<()> {
        for (name, url) in [
            ("api_url", &self.api_url),
            ("auth_url", &self.auth_url),
            ("public_url", &self.public_url),
        ] {
            reqwest::Url::parse(url)
                .map_err(|e| PortalError::Config(format!("{} '{}' is invalid: {}", name, url, e)))?;
        }

        if !self.supports_locale(&self.default_locale) {
            return Err(PortalError::Config(format!(
                "default locale '{}' is not one of {:?}",
                self.default_locale, self.supported_locales
            )));
        }
        Ok(())
    }

    pub fn supports_locale(&self, locale: &str) -> bool {
        self.supported_locales.iter().any(|l| l == locale)
    }
}
