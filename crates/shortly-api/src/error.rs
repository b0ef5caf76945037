use thiserror::Error;

/// Top-level error type for the `shortly-api` crate.
///
/// Every failure the gateway can produce is normalized into one of these
/// variants before it reaches a caller. `shortly-core` maps them into
/// user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Login probe ─────────────────────────────────────────────────
    /// The probe request was rejected with HTTP 401.
    #[error("Invalid username or password")]
    InvalidCredential,

    /// The probe request was rejected with HTTP 403.
    #[error("Account is disabled")]
    AccountDisabled,

    /// The probe failed for any other reason (unexpected status, transport).
    #[error("Login failed: {reason}")]
    LoginFailed { reason: String },

    // ── Transport ───────────────────────────────────────────────────
    /// The request never reached the server, or its response never came back.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing or path joining error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Server ──────────────────────────────────────────────────────
    /// The server answered outside 2xx. `detail` comes from the
    /// `{"detail": "..."}` body when present, else a generic fallback.
    #[error("HTTP {status}: {detail}")]
    Http { status: u16, detail: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization of a 2xx body failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Credentials ─────────────────────────────────────────────────
    /// The credential store could not persist or clear the credential.
    #[error("Credential store error: {0}")]
    CredentialStore(String),
}

impl Error {
    /// Returns `true` if this is a "not found" response.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status: 404, .. })
    }
}
