// ── App facade ──
//
// Constructed once per application instance. Owns the gateway, the
// session, and the notice channel, and hands out controllers only while
// the session is logged in.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::broadcast;
use tracing::info;

use shortly_api::{ApiClient, CredentialStore};

use crate::config::ServiceConfig;
use crate::detail::LinkDetail;
use crate::error::CoreError;
use crate::links::LinkList;
use crate::model::{LinkFilter, User};
use crate::notice::{Notice, Notifier};
use crate::session::Session;
use crate::top_stats::TopStats;

const MIN_PASSWORD_LEN: usize = 4;

/// Entry point for consumers. Cheaply cloneable.
#[derive(Clone)]
pub struct Shortly {
    config: Arc<ServiceConfig>,
    client: Arc<ApiClient>,
    session: Session,
    notifier: Notifier,
}

impl Shortly {
    /// Build the HTTP client from `config` and restore the session from
    /// `credentials`.
    pub fn new(config: ServiceConfig, credentials: Arc<dyn CredentialStore>) -> Result<Self, CoreError> {
        let client = ApiClient::new(config.api_url.as_str(), credentials, &config.transport())?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Wrap an existing gateway (tests, custom transports).
    pub fn with_client(config: ServiceConfig, client: Arc<ApiClient>) -> Self {
        let session = Session::new(Arc::clone(&client));
        Self {
            config: Arc::new(config),
            client,
            session,
            notifier: Notifier::new(),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn notices(&self) -> broadcast::Receiver<Notice> {
        self.notifier.subscribe()
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, username: &str, password: &SecretString) -> Result<User, CoreError> {
        if username.trim().is_empty() {
            return Err(CoreError::validation("username", "must not be empty"));
        }
        if password.expose_secret().chars().count() < MIN_PASSWORD_LEN {
            return Err(CoreError::validation(
                "password",
                format!("must be at least {MIN_PASSWORD_LEN} characters"),
            ));
        }
        match self.client.register(username, password).await {
            Ok(raw) => {
                info!(username, "account registered");
                self.notifier.success("Registration successful, you can now log in");
                Ok(User::from(raw))
            }
            Err(e) => {
                let err = CoreError::from(e);
                self.notifier.error(&err);
                Err(err)
            }
        }
    }

    // ── Session-gated controllers ────────────────────────────────────

    pub fn links(&self) -> Result<LinkList, CoreError> {
        self.require_session()?;
        Ok(LinkList::new(
            Arc::clone(&self.client),
            self.notifier.clone(),
            self.config.page_size,
        ))
    }

    /// A link list opened on `page` under `filter`, not yet fetched.
    pub fn links_with_view(&self, filter: LinkFilter, page: u32) -> Result<LinkList, CoreError> {
        self.require_session()?;
        LinkList::with_view(
            Arc::clone(&self.client),
            self.notifier.clone(),
            self.config.page_size,
            filter,
            page,
        )
    }

    pub fn link_detail(&self) -> Result<LinkDetail, CoreError> {
        self.require_session()?;
        Ok(LinkDetail::new(Arc::clone(&self.client), self.notifier.clone()))
    }

    pub fn top_stats(&self) -> Result<TopStats, CoreError> {
        self.require_session()?;
        Ok(TopStats::new(
            Arc::clone(&self.client),
            self.notifier.clone(),
            self.config.stats_top,
        ))
    }

    fn require_session(&self) -> Result<(), CoreError> {
        if self.session.is_logged_in() {
            Ok(())
        } else {
            Err(CoreError::NotAuthenticated)
        }
    }
}
