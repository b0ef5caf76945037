// Credential material and the store that owns it.
//
// The credential is an opaque base64 blob of `username:password`. It is
// built once at login, forwarded as `Authorization: Basic <blob>`, and
// otherwise never inspected.

use std::fmt;
use std::sync::{PoisonError, RwLock};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Storage key for the encoded credential blob.
pub const CREDENTIALS_KEY: &str = "credentials";
/// Storage key for the display name.
pub const USERNAME_KEY: &str = "username";

/// A persisted HTTP Basic credential plus the username it was built for.
#[derive(Clone)]
pub struct StoredCredential {
    encoded: SecretString,
    username: String,
}

impl StoredCredential {
    /// Encode a username/password pair into a Basic credential.
    pub fn from_password(username: &str, password: &SecretString) -> Self {
        let raw = format!("{username}:{}", password.expose_secret());
        Self {
            encoded: SecretString::from(STANDARD.encode(raw)),
            username: username.to_owned(),
        }
    }

    /// Rehydrate a credential read back from persistent storage.
    pub fn from_encoded(encoded: SecretString, username: String) -> Self {
        Self { encoded, username }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The opaque base64 blob, for stores that need to persist it.
    pub fn encoded(&self) -> &SecretString {
        &self.encoded
    }

    /// `Basic <blob>` as a sensitive header value.
    pub(crate) fn authorization(&self) -> Result<HeaderValue, Error> {
        let mut value =
            HeaderValue::from_str(&format!("Basic {}", self.encoded.expose_secret())).map_err(
                |e| Error::CredentialStore(format!("credential is not a valid header value: {e}")),
            )?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredCredential")
            .field("username", &self.username)
            .field("encoded", &"[REDACTED]")
            .finish()
    }
}

/// Holder of the single session credential.
///
/// Implementations decide where the credential lives (memory, a file, the
/// OS keyring). Absence of a credential is the only "logged out" signal.
pub trait CredentialStore: Send + Sync {
    /// Read the current credential, if any.
    fn get(&self) -> Option<StoredCredential>;

    /// Replace the stored credential.
    fn set(&self, credential: &StoredCredential) -> Result<(), Error>;

    /// Remove the stored credential. Removing an absent credential is not an error.
    fn clear(&self) -> Result<(), Error>;
}

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: RwLock<Option<StoredCredential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts out holding `credential`.
    pub fn with_credential(credential: StoredCredential) -> Self {
        Self {
            slot: RwLock::new(Some(credential)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Option<StoredCredential> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, credential: &StoredCredential) -> Result<(), Error> {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
