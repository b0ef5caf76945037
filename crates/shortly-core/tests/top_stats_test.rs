#![allow(clippy::unwrap_used)]
// TopStats controller against a mock server.

mod common;

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shortly_core::{FetchOutcome, SortBy, StatsSummary, TopN};

use common::{logged_in_store, setup, stats_json};

async fn mock_top(server: &MockServer, top: &str, sort_by: &str, items: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path("/api/stats/"))
        .and(query_param("top", top))
        .and(query_param("sort_by", sort_by))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn refresh_uses_defaults_and_sums_totals() {
    let (server, app) = setup(logged_in_store()).await;
    mock_top(
        &server,
        "10",
        "all",
        vec![stats_json("a", 1, 4, 30), stats_json("b", 2, 3, 12)],
    )
    .await;

    let stats = app.top_stats().unwrap();
    assert_eq!(stats.refresh().await.unwrap(), FetchOutcome::Applied);

    let state = stats.state();
    assert_eq!(state.top, TopN::Ten);
    assert_eq!(state.sort_by, SortBy::All);
    assert_eq!(state.items.len(), 2);
    assert_eq!(
        stats.summary(),
        StatsSummary {
            hour: 3,
            day: 7,
            all: 42
        }
    );
}

#[tokio::test]
async fn sort_change_replaces_the_whole_set() {
    let (server, app) = setup(logged_in_store()).await;
    mock_top(&server, "10", "hour", vec![stats_json("hot", 9, 9, 9)]).await;
    mock_top(
        &server,
        "10",
        "day",
        vec![stats_json("daily", 0, 20, 25), stats_json("other", 0, 5, 5)],
    )
    .await;

    let stats = app.top_stats().unwrap();
    stats.set_sort_by(SortBy::Hour).await.unwrap();
    assert_eq!(stats.state().items[0].short_id, "hot");

    stats.set_sort_by(SortBy::Day).await.unwrap();
    let state = stats.state();
    assert_eq!(state.sort_by, SortBy::Day);
    let keys: Vec<_> = state.items.iter().map(|r| r.short_id.as_str()).collect();
    assert_eq!(keys, ["daily", "other"]);
    assert_eq!(state.summary.hour, 0);
    assert_eq!(state.summary.all, 30);
}

#[tokio::test]
async fn top_change_refetches_and_same_value_does_not() {
    let (server, app) = setup(logged_in_store()).await;
    mock_top(&server, "25", "all", vec![]).await;

    let stats = app.top_stats().unwrap();
    assert_eq!(stats.set_top(TopN::TwentyFive).await.unwrap(), FetchOutcome::Applied);
    assert_eq!(stats.set_top(TopN::TwentyFive).await.unwrap(), FetchOutcome::Unchanged);
    assert_eq!(stats.set_sort_by(SortBy::All).await.unwrap(), FetchOutcome::Unchanged);
    assert_eq!(stats.summary(), StatsSummary::default());
}

#[tokio::test]
async fn failed_refresh_keeps_previous_window() {
    let (server, app) = setup(logged_in_store()).await;
    Mock::given(method("GET"))
        .and(path("/api/stats/"))
        .and(query_param("sort_by", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [stats_json("a", 1, 1, 1)]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/stats/"))
        .and(query_param("sort_by", "hour"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let stats = app.top_stats().unwrap();
    stats.refresh().await.unwrap();
    let err = stats.set_sort_by(SortBy::Hour).await.unwrap_err();

    assert_eq!(err.user_message(), "An error occurred");
    let state = stats.state();
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.summary.all, 1);
    assert!(!state.is_loading);
}

#[tokio::test]
async fn set_window_changes_both_with_one_fetch() {
    let (server, app) = setup(logged_in_store()).await;
    mock_top(&server, "50", "hour", vec![stats_json("h", 4, 4, 4)]).await;

    let stats = app.top_stats().unwrap();
    assert_eq!(
        stats.set_window(TopN::Fifty, SortBy::Hour).await.unwrap(),
        FetchOutcome::Applied
    );
    assert_eq!(
        stats.set_window(TopN::Fifty, SortBy::Hour).await.unwrap(),
        FetchOutcome::Unchanged
    );
    assert_eq!(stats.state().top, TopN::Fifty);
}

#[tokio::test]
async fn superseded_sort_response_is_discarded() {
    let (server, app) = setup(logged_in_store()).await;
    Mock::given(method("GET"))
        .and(path("/api/stats/"))
        .and(query_param("sort_by", "hour"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "items": [stats_json("slow", 50, 50, 50)] }))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    mock_top(&server, "10", "day", vec![stats_json("fast", 1, 2, 3)]).await;

    let stats = app.top_stats().unwrap();
    let (first, second) = tokio::join!(stats.set_sort_by(SortBy::Hour), stats.set_sort_by(SortBy::Day));

    assert_eq!(first.unwrap(), FetchOutcome::Discarded);
    assert_eq!(second.unwrap(), FetchOutcome::Applied);
    let state = stats.state();
    assert_eq!(state.sort_by, SortBy::Day);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].short_id, "fast");
    assert_eq!(
        state.summary,
        StatsSummary {
            hour: 1,
            day: 2,
            all: 3
        }
    );
    assert!(!state.is_loading);
}
