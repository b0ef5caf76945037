// ── Persistent credential stores ──
//
// Both stores keep the same two values under the well-known keys
// `credentials` and `username`. A missing `credentials` entry is the only
// "logged out" signal; read failures are logged and treated as absent.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use shortly_api::auth::{CREDENTIALS_KEY, USERNAME_KEY};
use shortly_api::{CredentialStore, Error, StoredCredential};

use crate::{ConfigError, Profile, session_path};

const KEYRING_SERVICE: &str = "shortly";

/// Which store a profile persists its login in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialBackend {
    /// JSON file in the platform data directory.
    #[default]
    File,
    /// The OS keyring.
    Keyring,
}

/// Build the store configured for `profile`.
pub fn open_credential_store(
    profile: &Profile,
    profile_name: &str,
) -> Result<Arc<dyn CredentialStore>, ConfigError> {
    let store: Arc<dyn CredentialStore> = match profile.credential_store {
        CredentialBackend::File => Arc::new(FileCredentialStore::new(session_path(profile_name))),
        CredentialBackend::Keyring => Arc::new(KeyringCredentialStore::new(profile_name)?),
    };
    Ok(store)
}

// ── File store ──────────────────────────────────────────────────────

/// A JSON object on disk: `{"credentials": "...", "username": "..."}`.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Option<Map<String, Value>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read session file");
                return None;
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Some(map),
            Ok(_) | Err(_) => {
                warn!(path = %self.path.display(), "ignoring malformed session file");
                None
            }
        }
    }
}

fn store_error(err: impl std::fmt::Display) -> Error {
    Error::CredentialStore(err.to_string())
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Option<StoredCredential> {
        let map = self.read()?;
        let encoded = map.get(CREDENTIALS_KEY)?.as_str()?.to_owned();
        let username = map
            .get(USERNAME_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        Some(StoredCredential::from_encoded(
            SecretString::from(encoded),
            username,
        ))
    }

    fn set(&self, credential: &StoredCredential) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(store_error)?;
        }
        let mut map = Map::new();
        map.insert(
            CREDENTIALS_KEY.into(),
            Value::String(credential.encoded().expose_secret().to_owned()),
        );
        map.insert(
            USERNAME_KEY.into(),
            Value::String(credential.username().to_owned()),
        );
        let body = serde_json::to_string_pretty(&Value::Object(map)).map_err(store_error)?;
        write_private(&self.path, &body)?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(store_error(e)),
        }
    }
}

/// Write `body` to a file only the owner can read. New files are created
/// 0600; an existing file is narrowed before the secret is written.
fn write_private(path: &Path, body: &str) -> Result<(), Error> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path).map_err(store_error)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))
            .map_err(store_error)?;
    }
    file.write_all(body.as_bytes()).map_err(store_error)
}

// ── Keyring store ───────────────────────────────────────────────────

/// OS keyring entries `<profile>/credentials` and `<profile>/username`
/// under the `shortly` service.
pub struct KeyringCredentialStore {
    credentials: keyring::Entry,
    username: keyring::Entry,
}

impl std::fmt::Debug for KeyringCredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyringCredentialStore").finish_non_exhaustive()
    }
}

impl KeyringCredentialStore {
    pub fn new(profile_name: &str) -> Result<Self, ConfigError> {
        let entry = |key: &str| {
            keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/{key}"))
                .map_err(|e| ConfigError::CredentialStore(e.to_string()))
        };
        Ok(Self {
            credentials: entry(CREDENTIALS_KEY)?,
            username: entry(USERNAME_KEY)?,
        })
    }
}

impl CredentialStore for KeyringCredentialStore {
    fn get(&self) -> Option<StoredCredential> {
        let encoded = match self.credentials.get_password() {
            Ok(secret) => secret,
            Err(keyring::Error::NoEntry) => return None,
            Err(e) => {
                warn!(error = %e, "cannot read credential from keyring");
                return None;
            }
        };
        let username = self.username.get_password().unwrap_or_default();
        Some(StoredCredential::from_encoded(
            SecretString::from(encoded),
            username,
        ))
    }

    fn set(&self, credential: &StoredCredential) -> Result<(), Error> {
        self.credentials
            .set_password(credential.encoded().expose_secret())
            .map_err(store_error)?;
        self.username
            .set_password(credential.username())
            .map_err(store_error)?;
        debug!("session saved to keyring");
        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        for entry in [&self.credentials, &self.username] {
            match entry.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => {}
                Err(e) => return Err(store_error(e)),
            }
        }
        Ok(())
    }
}
