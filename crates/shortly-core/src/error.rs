// ── Core error types ──
//
// User-facing errors from shortly-core. Controllers never hand raw
// transport errors to consumers; the `From<shortly_api::Error>` impl
// translates gateway failures into these variants.

use thiserror::Error;

/// Why the server refused a login probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("Invalid username or password")]
    InvalidCredential,

    #[error("Account is disabled")]
    AccountDisabled,
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the server: {reason}")]
    Network { reason: String },

    // ── Server errors ────────────────────────────────────────────────
    /// Non-2xx answer. `detail` is the server's message or the generic fallback.
    #[error("{detail}")]
    Http { status: u16, detail: String },

    // ── Local validation ─────────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("{0}")]
    Auth(AuthFailure),

    #[error("Login failed: {reason}")]
    LoginFailed { reason: String },

    #[error("Not logged in")]
    NotAuthenticated,

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_owned(),
            reason: reason.into(),
        }
    }

    /// Authentication problems: probe rejections, a missing session, or a
    /// 401 on a regular call (the stored credential went stale).
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::Auth(_) | Self::NotAuthenticated | Self::Http { status: 401, .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status: 404, .. })
    }

    /// The message shown on the notice channel.
    ///
    /// Server errors carry the server's own detail verbatim; everything
    /// else uses the `Display` text.
    pub fn user_message(&self) -> String {
        match self {
            Self::Http { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<shortly_api::Error> for CoreError {
    fn from(err: shortly_api::Error) -> Self {
        match err {
            shortly_api::Error::InvalidCredential => CoreError::Auth(AuthFailure::InvalidCredential),
            shortly_api::Error::AccountDisabled => CoreError::Auth(AuthFailure::AccountDisabled),
            shortly_api::Error::LoginFailed { reason } => CoreError::LoginFailed { reason },
            shortly_api::Error::Network(ref e) => {
                let reason = if e.is_timeout() {
                    "request timed out".to_owned()
                } else {
                    e.to_string()
                };
                CoreError::Network { reason }
            }
            shortly_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            shortly_api::Error::Tls(msg) => CoreError::Network {
                reason: format!("TLS error: {msg}"),
            },
            shortly_api::Error::Http { status, detail } => CoreError::Http { status, detail },
            shortly_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("unexpected response from server: {message}"))
            }
            shortly_api::Error::CredentialStore(msg) => {
                CoreError::Internal(format!("credential store: {msg}"))
            }
        }
    }
}
