#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use std::sync::Arc;

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shortly_api::{
    ApiClient, CredentialStore, Error, LinkQuery, MemoryCredentialStore, SortBy, StoredCredential,
};

// ── Helpers ─────────────────────────────────────────────────────────

/// Nothing listens on port 1, so connects are refused immediately.
const UNREACHABLE_BASE: &str = "http://127.0.0.1:1/api";

async fn setup(store: Arc<MemoryCredentialStore>) -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base = format!("{}/api", server.uri());
    let client = ApiClient::with_client(reqwest::Client::new(), &base, store).unwrap();
    (server, client)
}

fn logged_in_store() -> Arc<MemoryCredentialStore> {
    let cred = StoredCredential::from_password("alice", &SecretString::from("pw"));
    Arc::new(MemoryCredentialStore::with_credential(cred))
}

fn link_json(short_id: &str, active: bool) -> serde_json::Value {
    json!({
        "id": 1,
        "orig_url": "https://example.com/x",
        "short_id": short_id,
        "short_url": format!("http://sho.rt/{short_id}"),
        "user_id": 7,
        "created_at": "2026-10-01T12:00:00",
        "expire_at": "2026-10-02T12:00:00",
        "is_active": active
    })
}

// ── Headers ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_links_sends_basic_auth_and_json_content_type() {
    let (server, client) = setup(logged_in_store()).await;

    Mock::given(method("GET"))
        .and(path("/api/links/"))
        .and(header("authorization", "Basic YWxpY2U6cHc="))
        .and(header("content-type", "application/json"))
        .and(query_param("page", "2"))
        .and(query_param("page_size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 2,
            "page_size": 10,
            "total_items": 15,
            "total_pages": 2,
            "items": [link_json("abc", true)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client.list_links(&LinkQuery::new(2, 10)).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.current_page, 2);
    assert_eq!(page.total_items, 15);
    assert_eq!(page.items[0].short_id, "abc");
}

#[tokio::test]
async fn test_unauthenticated_call_omits_authorization() {
    let (server, client) = setup(Arc::new(MemoryCredentialStore::new())).await;

    Mock::given(method("GET"))
        .and(path("/api/stats/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Not authenticated"})))
        .mount(&server)
        .await;

    let result = client.top_stats(10, SortBy::All).await;
    assert!(
        matches!(result, Err(Error::Http { status: 401, ref detail }) if detail == "Not authenticated"),
        "got {result:?}"
    );

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

// ── Query construction ──────────────────────────────────────────────

#[tokio::test]
async fn test_list_query_param_order_and_unset_filters() {
    let (server, client) = setup(logged_in_store()).await;

    Mock::given(method("GET"))
        .and(path("/api/links/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1, "page_size": 10, "total_items": 0, "total_pages": 0, "items": []
        })))
        .mount(&server)
        .await;

    client.list_links(&LinkQuery::new(1, 10)).await.unwrap();
    client
        .list_links(&LinkQuery {
            page: 1,
            page_size: 10,
            is_valid: Some(true),
            is_active: Some(false),
        })
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("page=1&page_size=10"));
    assert_eq!(
        requests[1].url.query(),
        Some("page=1&page_size=10&is_valid=true&is_active=false")
    );
}

#[tokio::test]
async fn test_top_stats_query() {
    let (server, client) = setup(logged_in_store()).await;

    Mock::given(method("GET"))
        .and(path("/api/stats/"))
        .and(query_param("top", "25"))
        .and(query_param("sort_by", "hour"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "orig_url": "https://example.com/a",
                "short_url": "http://sho.rt/a1",
                "last_hour_clicks": 3,
                "last_day_clicks": 9,
                "all_clicks": 40
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stats = client.top_stats(25, SortBy::Hour).await.unwrap();
    assert_eq!(stats.items.len(), 1);
    assert_eq!(stats.items[0].all_clicks, 40);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("top=25&sort_by=hour"));
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_link_body() {
    let (server, client) = setup(logged_in_store()).await;

    Mock::given(method("POST"))
        .and(path("/api/links/"))
        .and(body_json(json!({"orig_url": "https://example.com/x", "expire_seconds": 604800})))
        .respond_with(ResponseTemplate::new(201).set_body_json(link_json("new1", true)))
        .expect(1)
        .mount(&server)
        .await;

    let link = client
        .create_link("https://example.com/x", Some(604_800))
        .await
        .unwrap();
    assert_eq!(link.short_id, "new1");
}

#[tokio::test]
async fn test_create_link_without_ttl_omits_field() {
    let (server, client) = setup(logged_in_store()).await;

    Mock::given(method("POST"))
        .and(path("/api/links/"))
        .and(body_json(json!({"orig_url": "https://example.com/y"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(link_json("new2", true)))
        .expect(1)
        .mount(&server)
        .await;

    client.create_link("https://example.com/y", None).await.unwrap();
}

#[tokio::test]
async fn test_deactivate_link() {
    let (server, client) = setup(logged_in_store()).await;

    Mock::given(method("PATCH"))
        .and(path("/api/links/abc/deactivate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(link_json("abc", false)))
        .expect(1)
        .mount(&server)
        .await;

    let link = client.deactivate_link("abc").await.unwrap();
    assert!(!link.is_active);
}

#[tokio::test]
async fn test_register_is_anonymous() {
    let (server, client) = setup(logged_in_store()).await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .and(body_json(json!({"username": "bob", "password": "pw2"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 5, "username": "bob"})))
        .expect(1)
        .mount(&server)
        .await;

    let user = client
        .register("bob", &SecretString::from("pw2"))
        .await
        .unwrap();
    assert_eq!(user.id, 5);
    assert!(user.is_active);

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

// ── Error normalization ─────────────────────────────────────────────

#[tokio::test]
async fn test_error_detail_from_body() {
    let (server, client) = setup(logged_in_store()).await;

    Mock::given(method("GET"))
        .and(path("/api/stats/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Link not found"})))
        .mount(&server)
        .await;

    let err = client.link_stats("missing").await.unwrap_err();
    assert!(err.is_not_found());
    match err {
        Error::Http { status, detail } => {
            assert_eq!(status, 404);
            assert_eq!(detail, "Link not found");
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_fallback_detail_for_unparseable_body() {
    let (server, client) = setup(logged_in_store()).await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    match client.deactivate_link("abc").await {
        Err(Error::Http { status: 502, detail }) => assert_eq!(detail, "An error occurred"),
        other => panic!("expected Http 502, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body_is_deserialization_error() {
    let (server, client) = setup(logged_in_store()).await;

    Mock::given(method("GET"))
        .and(path("/api/links/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.list_links(&LinkQuery::new(1, 10)).await;
    assert!(matches!(result, Err(Error::Deserialization { .. })), "got {result:?}");
}

#[tokio::test]
async fn test_malformed_multibyte_body_is_deserialization_error() {
    let (server, client) = setup(logged_in_store()).await;

    // The 200th character starts at byte 199 and spans two bytes.
    let body = format!("{}ошибка сервера", "x".repeat(199));
    Mock::given(method("GET"))
        .and(path("/api/links/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.clone()))
        .mount(&server)
        .await;

    let result = client.list_links(&LinkQuery::new(1, 10)).await;
    match result {
        Err(Error::Deserialization { body: raw, .. }) => assert_eq!(raw, body),
        other => panic!("expected Deserialization, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let base = UNREACHABLE_BASE;

    let client = ApiClient::with_client(reqwest::Client::new(), base, logged_in_store()).unwrap();
    let result = client.list_links(&LinkQuery::new(1, 10)).await;
    assert!(matches!(result, Err(Error::Network(_))), "got {result:?}");
}

// ── Login probe ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_success_persists_credential() {
    let store = Arc::new(MemoryCredentialStore::new());
    let (server, client) = setup(Arc::clone(&store)).await;

    Mock::given(method("GET"))
        .and(path("/api/links/"))
        .and(query_param("page", "1"))
        .and(query_param("page_size", "1"))
        .and(header("authorization", "Basic YWxpY2U6cHc="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1, "page_size": 1, "total_items": 0, "total_pages": 0, "items": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .login("alice", &SecretString::from("pw"))
        .await
        .unwrap();

    assert!(client.is_authenticated());
    assert_eq!(client.username().as_deref(), Some("alice"));
    assert_eq!(store.get().unwrap().username(), "alice");
}

#[tokio::test]
async fn test_login_probe_uses_candidate_not_stored_credential() {
    let (server, client) = setup(logged_in_store()).await;

    Mock::given(method("GET"))
        .and(path("/api/links/"))
        .and(header("authorization", "Basic Ym9iOnB3Mg=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1, "page_size": 1, "total_items": 0, "total_pages": 0, "items": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    client.login("bob", &SecretString::from("pw2")).await.unwrap();
    assert_eq!(client.username().as_deref(), Some("bob"));
}

#[tokio::test]
async fn test_login_401_is_invalid_credential_and_not_persisted() {
    let store = Arc::new(MemoryCredentialStore::new());
    let (server, client) = setup(Arc::clone(&store)).await;

    Mock::given(method("GET"))
        .and(path("/api/links/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.login("alice", &SecretString::from("wrong")).await;
    assert!(matches!(result, Err(Error::InvalidCredential)), "got {result:?}");
    assert!(store.get().is_none());
}

#[tokio::test]
async fn test_login_403_is_account_disabled_and_not_persisted() {
    let store = Arc::new(MemoryCredentialStore::new());
    let (server, client) = setup(Arc::clone(&store)).await;

    Mock::given(method("GET"))
        .and(path("/api/links/"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let result = client.login("alice", &SecretString::from("pw")).await;
    assert!(matches!(result, Err(Error::AccountDisabled)), "got {result:?}");
    assert!(store.get().is_none());
}

#[tokio::test]
async fn test_login_other_status_is_login_failed() {
    let store = Arc::new(MemoryCredentialStore::new());
    let (server, client) = setup(Arc::clone(&store)).await;

    Mock::given(method("GET"))
        .and(path("/api/links/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.login("alice", &SecretString::from("pw")).await;
    assert!(matches!(result, Err(Error::LoginFailed { .. })), "got {result:?}");
    assert!(store.get().is_none());
}

#[tokio::test]
async fn test_login_network_failure_is_login_failed() {
    let base = UNREACHABLE_BASE;

    let store = Arc::new(MemoryCredentialStore::new());
    let client =
        ApiClient::with_client(reqwest::Client::new(), base, Arc::clone(&store) as Arc<dyn CredentialStore>)
            .unwrap();

    let result = client.login("alice", &SecretString::from("pw")).await;
    assert!(matches!(result, Err(Error::LoginFailed { .. })), "got {result:?}");
    assert!(store.get().is_none());
}

#[tokio::test]
async fn test_logout_clears_without_network() {
    let store = logged_in_store();
    let (server, client) = setup(Arc::clone(&store)).await;

    client.logout();

    assert!(!client.is_authenticated());
    assert!(store.get().is_none());
    assert!(server.received_requests().await.unwrap().is_empty());
}
