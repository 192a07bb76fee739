//! Auth-server endpoints: session inspection, keep-alive, logout and the
//! authorization-code exchange.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::client::{ClientFactory, ClientOptions};
use crate::config::AUTH_SCOPE;
use crate::error::PortalResult;

const SESSION_PATH: &str = "/api/1.0/session";
const KEEP_ALIVE_PATH: &str = "/api/1.0/session/keep-alive";
const TOKEN_PATH: &str = "/1.0/token";

/// Route the auth server redirects back to after login.
pub const AUTH_DONE_PATH: &str = "/auth-done";

/// The current session as reported by the auth server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    #[serde(default)]
    pub active: bool,
    /// Anything else the server sends (user name, roles, expiry).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRequest {
    pub code: String,
    pub client_id: String,
    pub grant_type: String,
}

impl TokenRequest {
    pub fn authorization_code(code: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            client_id: client_id.into(),
            grant_type: "authorization_code".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token_type: String,
    /// Seconds until the token expires.
    #[serde(default)]
    pub expires_in: i64,
    pub access_token: String,
}

impl TokenResponse {
    /// Expiry instant for a token issued at `issued_at`.
    pub fn expires_at(&self, issued_at: DateTime<Utc>) -> DateTime<Utc> {
        issued_at + Duration::seconds(self.expires_in)
    }
}

#[derive(Clone)]
pub struct AuthService {
    factory: ClientFactory,
}

impl AuthService {
    pub fn new(factory: ClientFactory) -> Self {
        Self { factory }
    }

    pub async fn session(&self) -> PortalResult<SessionInfo> {
        self.factory
            .auth(ClientOptions::default())
            .await
            .get_json(SESSION_PATH)
            .await
    }

    pub async fn keep_alive(&self) -> PortalResult<()> {
        self.factory
            .auth(ClientOptions::default())
            .await
            .get(KEEP_ALIVE_PATH)
            .await?;
        Ok(())
    }

    /// End the session on the server and drop the local token.
    ///
    /// The token is removed even when the server call fails; the server
    /// error is still returned.
    pub async fn logout(&self) -> PortalResult<()> {
        let result = self
            .factory
            .auth(ClientOptions::default())
            .await
            .delete(SESSION_PATH)
            .await;

        self.factory
            .context()
            .session
            .store()
            .remove_session_key()
            .await?;
        result?;

        tracing::info!("Session ended");
        Ok(())
    }

    /// Exchange a one-time authorization code for an access token and store
    /// it as the session token.
    pub async fn start_session(&self, code: &str) -> PortalResult<TokenResponse> {
        let request = TokenRequest::authorization_code(code, &self.factory.config().client_id);
        let token: TokenResponse = self
            .factory
            .auth(ClientOptions::anonymous())
            .await
            .post_json(TOKEN_PATH, &request)
            .await?;

        self.factory
            .context()
            .session
            .store()
            .set_session_key(&token.access_token)
            .await?;

        tracing::info!(
            expires_in = token.expires_in,
            expires_at = %token.expires_at(Utc::now()),
            "Session started"
        );
        Ok(token)
    }

    /// URL of the auth-server login page.
    pub fn authorize_url(&self) -> String {
        let config = self.factory.config();
        let redirect_uri = format!(
            "{}{}",
            config.public_url.trim_end_matches('/'),
            AUTH_DONE_PATH
        );
        format!(
            "{}/authorize?response_type=code&client_id={}&scope={}&redirect_uri={}",
            config.auth_url.trim_end_matches('/'),
            urlencoding::encode(&config.client_id),
            urlencoding::encode(AUTH_SCOPE),
            urlencoding::encode(&redirect_uri)
        )
    }
}
