//! Wiring of the portal for the command line and execution of commands.

use std::sync::Arc;

use chrono::Utc;

use super::args::{CliCommand, USAGE};
use super::version::VERSION;
use crate::adapters::{FileStorage, InMemoryStorage, ProcessLifecycle, ReqwestHttpClient};
use crate::api::{AuthService, ClientFactory, CredentialService, HashVerification};
use crate::config::AppConfig;
use crate::error::{HttpFailure, PortalError, PortalResult};
use crate::i18n::Localizer;
use crate::interceptors::InterceptorContext;
use crate::notify::NotifyStore;
use crate::session::{SessionContext, SessionStore};
use crate::traits::{HttpClient, KeyValueStorage, Translator};
use crate::utils::file_hash_path;

const SESSION_EXPIRED_KEY: &str = "session.expired";

/// Everything a command needs, built once per process.
pub struct Portal {
    config: AppConfig,
    factory: ClientFactory,
    auth: AuthService,
    credentials: CredentialService,
    notifications: NotifyStore,
    localizer: Arc<Localizer>,
    lifecycle: ProcessLifecycle,
}

impl Portal {
    /// Build the portal over an explicit transport and token storage.
    pub fn new(
        config: AppConfig,
        http: Arc<dyn HttpClient>,
        persisted: Arc<dyn KeyValueStorage>,
    ) -> Self {
        let notifications = NotifyStore::new();
        let localizer = Arc::new(Localizer::from_config(&config));
        let lifecycle = ProcessLifecycle::new();

        let session = SessionContext::new(
            SessionStore::new(persisted),
            Arc::new(InMemoryStorage::new()),
            Arc::new(lifecycle.clone()),
        );
        let ctx = InterceptorContext::new(
            session,
            Arc::new(notifications.clone()),
            localizer.clone(),
        );
        let factory = ClientFactory::new(config.clone(), http, ctx);

        Self {
            auth: AuthService::new(factory.clone()),
            credentials: CredentialService::new(factory.clone()),
            config,
            factory,
            notifications,
            localizer,
            lifecycle,
        }
    }

    /// Reqwest transport and the token file under the home directory.
    pub fn production(config: AppConfig) -> PortalResult<Self> {
        config.validate()?;
        let storage = FileStorage::new()?;
        tracing::debug!(path = %storage.path().display(), "using session storage");
        Ok(Self::new(
            config,
            Arc::new(ReqwestHttpClient::new()),
            Arc::new(storage),
        ))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn factory(&self) -> &ClientFactory {
        &self.factory
    }

    pub fn notifications(&self) -> &NotifyStore {
        &self.notifications
    }

    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    pub fn lifecycle(&self) -> &ProcessLifecycle {
        &self.lifecycle
    }

    /// Run a command and return what should be printed.
    pub async fn execute(&self, command: &CliCommand) -> PortalResult<String> {
        match command {
            CliCommand::Version => Ok(format!("credportal {}", VERSION)),
            CliCommand::Help => Ok(USAGE.to_string()),
            CliCommand::Invalid(message) => {
                Err(PortalError::Usage(format!("{}\n\n{}", message, USAGE)))
            }
            CliCommand::Login { code } => {
                let token = self.auth.start_session(code).await?;
                Ok(format!(
                    "Signed in ({} token, expires in {}s at {})",
                    token.token_type,
                    token.expires_in,
                    token.expires_at(Utc::now()).format("%Y-%m-%d %H:%M:%S UTC")
                ))
            }
            CliCommand::AuthorizeUrl { open } => {
                let url = self.auth.authorize_url();
                if *open {
                    if let Err(e) = webbrowser::open(&url) {
                        tracing::warn!("Could not open browser: {}", e);
                    }
                }
                Ok(url)
            }
            CliCommand::Session => {
                let info = self.auth.session().await?;
                Ok(serde_json::to_string_pretty(&info)?)
            }
            CliCommand::KeepAlive => {
                self.auth.keep_alive().await?;
                Ok("Session extended".to_string())
            }
            CliCommand::Logout => {
                self.auth.logout().await?;
                Ok("Signed out".to_string())
            }
            CliCommand::Hash { path } => {
                let hash = file_hash_path(path).await?;
                Ok(format!("{}  {}", hash, path.display()))
            }
            CliCommand::VerifyHash { path } => {
                let hash = file_hash_path(path).await?;
                let result = self
                    .credentials
                    .verify_diploma_hash(&HashVerification {
                        diploma_hash: hash.clone(),
                    })
                    .await?;
                let verdict = if result.valid { "valid" } else { "not valid" };
                Ok(format!("{}  {}: {}", hash, path.display(), verdict))
            }
        }
    }

    /// Lines to show after `err`: the queued notifications, then the
    /// re-login hint if the session was invalidated or the call was refused
    /// for lack of a token.
    pub fn failure_report(&self, err: &PortalError) -> Vec<String> {
        let mut lines: Vec<String> = self
            .notifications
            .drain()
            .into_iter()
            .map(|n| n.message)
            .collect();
        let reloaded = self.lifecycle.reload_requested();
        if reloaded {
            self.lifecycle.acknowledge();
        }
        let unauthorized = err.failure().map_or(false, HttpFailure::is_unauthorized);
        if reloaded || unauthorized {
            lines.push(self.localizer.translate(SESSION_EXPIRED_KEY));
        }
        lines
    }
}
