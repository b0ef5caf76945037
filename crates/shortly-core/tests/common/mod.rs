#![allow(dead_code, clippy::unwrap_used)]
// Shared fixtures for shortly-core integration tests.

use std::sync::Arc;

use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::MockServer;

use shortly_api::{ApiClient, MemoryCredentialStore, StoredCredential, TransportConfig};
use shortly_core::{ServiceConfig, Shortly};

pub fn logged_in_store() -> Arc<MemoryCredentialStore> {
    let cred = StoredCredential::from_password("alice", &SecretString::from("pw"));
    Arc::new(MemoryCredentialStore::with_credential(cred))
}

pub fn client_for(server: &MockServer, store: Arc<MemoryCredentialStore>) -> Arc<ApiClient> {
    let base = format!("{}/api", server.uri());
    Arc::new(ApiClient::new(&base, store, &TransportConfig::default()).unwrap())
}

/// A mock server plus an app facade pointed at it.
pub async fn setup(store: Arc<MemoryCredentialStore>) -> (MockServer, Shortly) {
    let server = MockServer::start().await;
    let client = client_for(&server, store);
    let config = ServiceConfig::new(Url::parse(&format!("{}/api", server.uri())).unwrap());
    (server, Shortly::with_client(config, client))
}

pub fn link_json(id: i64, short_id: &str, is_active: bool) -> Value {
    json!({
        "id": id,
        "orig_url": format!("https://example.com/{short_id}"),
        "short_id": short_id,
        "short_url": format!("http://localhost:8000/{short_id}"),
        "user_id": 1,
        "created_at": "2024-05-01T10:00:00",
        "expire_at": "2099-01-01T00:00:00",
        "is_active": is_active
    })
}

pub fn page_json(items: Vec<Value>, total_items: u64, total_pages: u32, page: u32) -> Value {
    json!({
        "items": items,
        "total_items": total_items,
        "total_pages": total_pages,
        "page": page,
        "page_size": 10
    })
}

pub fn stats_json(short_id: &str, hour: u64, day: u64, all: u64) -> Value {
    json!({
        "short_id": short_id,
        "short_url": format!("http://localhost:8000/{short_id}"),
        "orig_url": format!("https://example.com/{short_id}"),
        "last_hour_clicks": hour,
        "last_day_clicks": day,
        "all_clicks": all
    })
}
