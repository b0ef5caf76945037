#![allow(clippy::unwrap_used)]
// File-backed credential store and config loading round trips on disk.

use pretty_assertions::assert_eq;
use secrecy::{ExposeSecret, SecretString};

use shortly_api::{CredentialStore, StoredCredential};
use shortly_config::{
    Config, CredentialBackend, FileCredentialStore, Profile, load_config_from, save_config_to,
};

#[test]
fn file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("session.json");

    let store = FileCredentialStore::new(&path);
    assert!(store.get().is_none());
    store
        .set(&StoredCredential::from_password(
            "alice",
            &SecretString::from("s3cret"),
        ))
        .unwrap();

    let reopened = FileCredentialStore::new(&path);
    let cred = reopened.get().unwrap();
    assert_eq!(cred.username(), "alice");
    assert_eq!(cred.encoded().expose_secret(), "YWxpY2U6czNjcmV0");

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["credentials"], "YWxpY2U6czNjcmV0");
    assert_eq!(raw["username"], "alice");
}

#[test]
fn clear_removes_the_file_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let store = FileCredentialStore::new(&path);
    store
        .set(&StoredCredential::from_password("bob", &SecretString::from("pw")))
        .unwrap();

    store.clear().unwrap();
    assert!(!path.exists());
    assert!(store.get().is_none());
    store.clear().unwrap();
}

#[test]
fn missing_credentials_key_means_logged_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, r#"{"username": "ghost"}"#).unwrap();
    assert!(FileCredentialStore::new(&path).get().is_none());

    std::fs::write(&path, "not json").unwrap();
    assert!(FileCredentialStore::new(&path).get().is_none());
}

#[cfg(unix)]
#[test]
fn session_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    FileCredentialStore::new(&path)
        .set(&StoredCredential::from_password("bob", &SecretString::from("pw")))
        .unwrap();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[cfg(unix)]
#[test]
fn existing_readable_session_file_is_narrowed() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{}").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

    let store = FileCredentialStore::new(&path);
    store
        .set(&StoredCredential::from_password("bob", &SecretString::from("pw")))
        .unwrap();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    assert_eq!(store.get().unwrap().username(), "bob");
}

#[test]
fn config_round_trips_through_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.defaults.page_size = 25;
    config.profiles.insert(
        "work".into(),
        Profile {
            api_url: "https://sho.rt/api".into(),
            credential_store: CredentialBackend::Keyring,
            timeout: Some(10),
            ..Profile::default()
        },
    );
    save_config_to(&config, &path).unwrap();

    let loaded = load_config_from(&path).unwrap();
    assert_eq!(loaded.defaults.page_size, 25);
    let work = loaded.profile("work").unwrap();
    assert_eq!(work.credential_store, CredentialBackend::Keyring);
    assert_eq!(work.timeout, Some(10));
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_config_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(loaded.default_profile.as_deref(), Some("default"));
    assert_eq!(loaded.defaults.output, "table");
}
