//! Client factory and the per-audience request client.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::{HttpFailure, PortalResult};
use crate::interceptors::{InterceptorChain, InterceptorContext};
use crate::traits::{Headers, HttpClient, Method, Response};

/// Which backend a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Credential API, authenticated with the static API key.
    General,
    /// Auth server, authenticated with the session bearer token.
    Auth,
}

impl Audience {
    pub fn requires_session(&self) -> bool {
        matches!(self, Audience::Auth)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientOptions {
    /// Attach the notification stage to the failure chain.
    pub use_exception_interceptor: bool,
    /// Build a live client even when no session token is stored.
    pub allow_anonymous: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            use_exception_interceptor: true,
            allow_anonymous: false,
        }
    }
}

impl ClientOptions {
    pub fn anonymous() -> Self {
        Self {
            allow_anonymous: true,
            ..Self::default()
        }
    }

    pub fn silent() -> Self {
        Self {
            use_exception_interceptor: false,
            ..Self::default()
        }
    }
}

/// Builds request clients from the configuration, the transport and the
/// shared session/notification context.
#[derive(Clone)]
pub struct ClientFactory {
    config: AppConfig,
    http: Arc<dyn HttpClient>,
    ctx: InterceptorContext,
}

impl ClientFactory {
    pub fn new(config: AppConfig, http: Arc<dyn HttpClient>, ctx: InterceptorContext) -> Self {
        Self { config, http, ctx }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn context(&self) -> &InterceptorContext {
        &self.ctx
    }

    /// Client for the general API.
    pub async fn api(&self) -> ApiClient {
        self.client(Audience::General, ClientOptions::default()).await
    }

    /// Client for the auth server.
    pub async fn auth(&self, options: ClientOptions) -> ApiClient {
        self.client(Audience::Auth, options).await
    }

    /// Build a client for `audience`.
    ///
    /// The session token is read once, here. An auth client built without a
    /// token (and without `allow_anonymous`) rejects every call with a
    /// synthetic 401 and never touches the network.
    pub async fn client(&self, audience: Audience, options: ClientOptions) -> ApiClient {
        let token = match self.ctx.session.store().get_session_key().await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Could not read session token: {}", e);
                None
            }
        };

        if audience.requires_session() && token.is_none() && !options.allow_anonymous {
            tracing::debug!("no session token, auth client will reject all requests");
            return ApiClient {
                inner: ClientInner::Rejecting,
            };
        }

        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        let base_url = match audience {
            Audience::General => {
                headers.insert("X-API-Key".to_string(), self.config.api_key.clone());
                self.config.api_url.clone()
            }
            Audience::Auth => {
                if let Some(token) = token {
                    headers.insert("Authorization".to_string(), format!("Bearer {}", token));
                }
                self.config.auth_url.clone()
            }
        };

        ApiClient {
            inner: ClientInner::Live(LiveClient {
                base_url,
                headers,
                http: self.http.clone(),
                chain: InterceptorChain::standard(options.use_exception_interceptor),
                ctx: self.ctx.clone(),
            }),
        }
    }
}

/// A configured request client.
///
/// Every verb returns the response on 2xx. Anything else comes back as an
/// [`HttpFailure`] after the interceptor chain has seen it.
#[derive(Clone)]
pub struct ApiClient {
    inner: ClientInner,
}

#[derive(Clone)]
enum ClientInner {
    Live(LiveClient),
    Rejecting,
}

#[derive(Clone)]
struct LiveClient {
    base_url: String,
    headers: Headers,
    http: Arc<dyn HttpClient>,
    chain: InterceptorChain,
    ctx: InterceptorContext,
}

impl LiveClient {
    fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&str>,
    ) -> Result<Response, HttpFailure> {
        let url = self.url(path);
        tracing::debug!(%method, %url, "dispatching request");

        let failure = match self.http.request(method, &url, body, &self.headers).await {
            Ok(response) if response.is_success() => return Ok(response),
            Ok(response) => HttpFailure::from_response(&response),
            Err(e) => HttpFailure::from_transport(&e),
        };

        tracing::debug!(%method, %url, "request failed: {}", failure);
        Err(self.chain.run(failure, &self.ctx).await)
    }
}

impl ApiClient {
    /// Whether this client short-circuits every call with a 401.
    pub fn is_rejecting(&self) -> bool {
        matches!(self.inner, ClientInner::Rejecting)
    }

    /// Base URL, `None` for a rejecting client.
    pub fn base_url(&self) -> Option<&str> {
        match &self.inner {
            ClientInner::Live(live) => Some(&live.base_url),
            ClientInner::Rejecting => None,
        }
    }

    /// Default headers, `None` for a rejecting client.
    pub fn headers(&self) -> Option<&Headers> {
        match &self.inner {
            ClientInner::Live(live) => Some(&live.headers),
            ClientInner::Rejecting => None,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&str>,
    ) -> Result<Response, HttpFailure> {
        match &self.inner {
            ClientInner::Live(live) => live.send(method, path, body).await,
            ClientInner::Rejecting => Err(HttpFailure::unauthorized()),
        }
    }

    pub async fn get(&self, path: &str) -> Result<Response, HttpFailure> {
        self.request(Method::Get, path, None).await
    }

    pub async fn post(&self, path: &str, body: &str) -> Result<Response, HttpFailure> {
        self.request(Method::Post, path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: &str) -> Result<Response, HttpFailure> {
        self.request(Method::Put, path, Some(body)).await
    }

    pub async fn patch(&self, path: &str, body: &str) -> Result<Response, HttpFailure> {
        self.request(Method::Patch, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Response, HttpFailure> {
        self.request(Method::Delete, path, None).await
    }

    /// GET and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> PortalResult<T> {
        let response = self.get(path).await?;
        Ok(response.json()?)
    }

    /// POST a JSON body and decode the JSON reply.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> PortalResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let body = serde_json::to_string(body)?;
        let response = self.post(path, &body).await?;
        Ok(response.json()?)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            ClientInner::Live(live) => f
                .debug_struct("ApiClient")
                .field("base_url", &live.base_url)
                .field("chain", &live.chain)
                .finish(),
            ClientInner::Rejecting => f.write_str("ApiClient(rejecting)"),
        }
    }
}
