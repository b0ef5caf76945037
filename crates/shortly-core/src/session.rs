// ── Session ──
//
// Observable login state derived from the credential store.
//
// Construction reads the store synchronously and exposes an optimistic
// snapshot with `loading = true`. `initialize()` re-reads the store and
// confirms it exactly once. Only `login()` and `logout()` mutate the
// session after that.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::watch;
use tracing::{debug, info};

use shortly_api::ApiClient;

use crate::error::CoreError;

/// Where the session is in its startup sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// Only the `Default` value of a bare `SessionState`; a constructed
    /// `Session` is already `Reconciling`.
    #[default]
    Uninitialized,
    /// Optimistic state from the first store read; not yet confirmed.
    Reconciling,
    Ready,
}

/// Snapshot of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub logged_in: bool,
    pub username: Option<String>,
    /// `true` until `initialize()` has run.
    pub loading: bool,
    pub phase: SessionPhase,
}

/// Cheaply cloneable handle to the session.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    client: Arc<ApiClient>,
    state: watch::Sender<SessionState>,
}

impl Session {
    pub fn new(client: Arc<ApiClient>) -> Self {
        let logged_in = client.is_authenticated();
        let (state, _) = watch::channel(SessionState {
            logged_in,
            username: client.username(),
            loading: true,
            phase: SessionPhase::Reconciling,
        });
        debug!(logged_in, "session restored optimistically");

        Self {
            inner: Arc::new(SessionInner { client, state }),
        }
    }

    /// Re-read the credential store and confirm the session.
    ///
    /// Runs once; later calls are no-ops.
    pub fn initialize(&self) {
        let logged_in = self.inner.client.is_authenticated();
        let username = self.inner.client.username();
        let confirmed = self.inner.state.send_if_modified(|s| {
            if s.phase == SessionPhase::Ready {
                return false;
            }
            s.logged_in = logged_in;
            s.username = username;
            s.loading = false;
            s.phase = SessionPhase::Ready;
            true
        });
        if confirmed {
            info!(logged_in, "session ready");
        }
    }

    /// Current snapshot, possibly still optimistic.
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// The snapshot once `initialize()` has confirmed it.
    pub fn confirmed(&self) -> Option<SessionState> {
        let state = self.inner.state.borrow();
        (state.phase == SessionPhase::Ready).then(|| state.clone())
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.state.borrow().logged_in
    }

    pub fn username(&self) -> Option<String> {
        self.inner.state.borrow().username.clone()
    }

    /// Probe the server with the candidate credential and persist it on success.
    ///
    /// On failure the session is left untouched.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), CoreError> {
        if username.trim().is_empty() {
            return Err(CoreError::validation("username", "must not be empty"));
        }
        if password.expose_secret().trim().is_empty() {
            return Err(CoreError::validation("password", "must not be empty"));
        }
        self.inner.client.login(username, password).await?;
        self.inner.state.send_modify(|s| {
            s.logged_in = true;
            s.username = Some(username.to_owned());
        });
        info!(username, "logged in");
        Ok(())
    }

    /// Drop the stored credential. No network call, cannot fail.
    pub fn logout(&self) {
        self.inner.client.logout();
        self.inner.state.send_modify(|s| {
            s.logged_in = false;
            s.username = None;
        });
        info!("logged out");
    }
}
