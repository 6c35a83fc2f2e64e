use movie_discovery::clients::{ActorClient, DiscoveryError};
use movie_discovery::config::{ControllerConfig, GatewayConfig};
use movie_discovery::gateway::mock::MockTransport;
use movie_discovery::gateway::{FetchGateway, NETWORK_FAILURE_MESSAGE};
use movie_discovery::lifecycle::DiscoverySystem;
use movie_discovery::model::{PageNumber, UrlParams, ViewStatus};
use movie_discovery::query_actor::QueryError;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

const BASE: &str = "https://api.example/3";

fn start(transport: &MockTransport, initial: &str) -> DiscoverySystem {
    let gateway = FetchGateway::new(
        GatewayConfig::new(BASE, "test-key"),
        Arc::new(transport.clone()),
    );
    DiscoverySystem::new(&ControllerConfig::default(), gateway, UrlParams::parse(initial))
}

/// Lets every ready task run. With paused time the clock only moves once the runtime is idle.
async fn idle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

fn search_url(query: &str, page: u32) -> String {
    format!("{BASE}/search/movie?query={query}&page={page}")
}

fn listing_url(page: u32) -> String {
    format!("{BASE}/discover/movie?page={page}&sort_by=popularity.desc")
}

fn page_of(titles: &[&str]) -> serde_json::Value {
    let results: Vec<_> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| json!({ "id": i + 1, "title": title, "original_language": "en" }))
        .collect();
    json!({ "page": 1, "results": results })
}

#[tokio::test(start_paused = true)]
async fn test_rapid_typing_fetches_once_for_last_text() {
    let transport = MockTransport::new();
    let system = start(&transport, "");
    idle().await;

    system.client.input("bat").await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    system.client.input("batman").await.unwrap();

    let typing = system.client.snapshot().await.unwrap();
    assert_eq!(typing.search, "batman");
    assert_eq!(typing.query, "");
    assert!(typing.debounce_pending);

    tokio::time::sleep(Duration::from_millis(600)).await;

    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.query, "batman");
    assert_eq!(snapshot.page, PageNumber::FIRST);
    assert_eq!(snapshot.url, "query=batman&page=1");
    assert!(!snapshot.debounce_pending);
    assert_eq!(
        transport.urls(),
        vec![listing_url(1), search_url("batman", 1)]
    );

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_pauses_between_words_search_each_settled_value() {
    let transport = MockTransport::new();
    let system = start(&transport, "");
    idle().await;

    system.client.input("star").await.unwrap();
    tokio::time::sleep(Duration::from_millis(700)).await;
    system.client.input("star wars").await.unwrap();
    tokio::time::sleep(Duration::from_millis(700)).await;

    assert_eq!(
        transport.urls(),
        vec![
            listing_url(1),
            search_url("star", 1),
            search_url("star%20wars", 1)
        ]
    );
    assert_eq!(system.client.snapshot().await.unwrap().url, "query=star+wars&page=1");

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_initial_url_round_trip() {
    let transport = MockTransport::new();
    transport.expect_get().respond_json(page_of(&["Batman Returns"]));

    let system = start(&transport, "https://movies.example/?query=batman&page=3");
    idle().await;

    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.search, "batman");
    assert_eq!(snapshot.query, "batman");
    assert_eq!(snapshot.page.get(), 3);
    assert_eq!(snapshot.url, "query=batman&page=3");
    assert_eq!(snapshot.fetches_issued, 1);
    assert_eq!(snapshot.status.movies()[0].title, "Batman Returns");
    assert_eq!(transport.urls(), vec![search_url("batman", 3)]);

    transport.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_page_never_drops_below_one() {
    let transport = MockTransport::new();
    let system = start(&transport, "?query=heat");
    idle().await;

    for _ in 0..5 {
        system.client.previous_page().await.unwrap();
    }
    idle().await;

    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.page, PageNumber::FIRST);
    assert_eq!(snapshot.fetches_issued, 1);

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_url_change_matching_state_is_idempotent() {
    let transport = MockTransport::new();
    let system = start(&transport, "?query=up&page=2");
    idle().await;

    system
        .client
        .url_changed(UrlParams::new("up", 2))
        .await
        .unwrap();
    idle().await;

    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.fetches_issued, 1);
    assert_eq!(transport.urls().len(), 1);

    system
        .client
        .url_changed(UrlParams::new("up", 4))
        .await
        .unwrap();
    idle().await;

    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.page.get(), 4);
    assert_eq!(snapshot.url, "query=up&page=4");
    assert_eq!(transport.urls().last(), Some(&search_url("up", 4)));

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_navigating_to_settled_url_abandons_typing() {
    let transport = MockTransport::new();
    let system = start(&transport, "");
    idle().await;

    system.client.input("draft").await.unwrap();
    system
        .client
        .url_changed(UrlParams::new("", 1))
        .await
        .unwrap();

    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.search, "");
    assert!(!snapshot.debounce_pending);

    tokio::time::sleep(Duration::from_millis(700)).await;

    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.query, "");
    assert_eq!(snapshot.url, "page=1");
    assert_eq!(transport.urls(), vec![listing_url(1)]);

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_later_issued_fetch_wins() {
    let transport = MockTransport::new();
    transport.expect_get().respond_json(page_of(&["Page one"]));
    transport
        .expect_get()
        .after(Duration::from_millis(300))
        .respond_json(page_of(&["Page two"]));
    transport.expect_get().respond_json(page_of(&["Page three"]));

    let system = start(&transport, "");
    idle().await;

    system.client.next_page().await.unwrap();
    system.client.next_page().await.unwrap();
    idle().await;

    let titles = |status: &ViewStatus| -> Vec<String> {
        status.movies().iter().map(|m| m.title.clone()).collect()
    };
    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(titles(&snapshot.status), vec!["Page three"]);

    // The slow page-two response lands last and is discarded
    tokio::time::sleep(Duration::from_millis(500)).await;
    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.page.get(), 3);
    assert_eq!(titles(&snapshot.status), vec!["Page three"]);

    transport.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_missing_response_shows_error_without_results() {
    let transport = MockTransport::new();
    transport.expect_get().respond_json(page_of(&["Heat"]));
    transport.expect_get().respond_none();

    let system = start(&transport, "?query=heat");
    idle().await;
    assert_eq!(
        system.client.snapshot().await.unwrap().status.movies().len(),
        1
    );

    system.client.next_page().await.unwrap();
    idle().await;

    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.status.error(), Some(NETWORK_FAILURE_MESSAGE));
    assert!(snapshot.status.movies().is_empty());
    assert_eq!(snapshot.page.get(), 2);
    assert_eq!(snapshot.url, "query=heat&page=2");

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_api_failure_message_is_shown() {
    let transport = MockTransport::new();
    transport
        .expect_get()
        .respond_json(json!({ "Response": "False", "Error": "Too many results." }));

    let system = start(&transport, "?query=a");
    idle().await;

    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(
        snapshot.status,
        ViewStatus::Failed("Too many results.".into())
    );

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_typing_replaces_and_paging_pushes() {
    let transport = MockTransport::new();
    let system = start(&transport, "");
    idle().await;

    system.client.input("alien").await.unwrap();
    tokio::time::sleep(Duration::from_millis(600)).await;

    // The settled search replaced the only entry
    let err = system.client.back().await.unwrap_err();
    assert_eq!(err, DiscoveryError::Navigation(QueryError::NoHistoryEntry));

    system.client.next_page().await.unwrap();
    idle().await;
    let fetches_before = transport.urls().len();

    system.client.back().await.unwrap();
    idle().await;

    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.query, "alien");
    assert_eq!(snapshot.page, PageNumber::FIRST);
    assert_eq!(snapshot.url, "query=alien&page=1");
    assert_eq!(transport.urls().len(), fetches_before + 1);
    assert_eq!(transport.urls().last(), Some(&search_url("alien", 1)));

    system.client.forward().await.unwrap();
    idle().await;
    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.page.get(), 2);
    assert_eq!(snapshot.url, "query=alien&page=2");

    let err = system.client.forward().await.unwrap_err();
    assert_eq!(err, DiscoveryError::Navigation(QueryError::NoHistoryEntry));

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_open_adopts_url_and_cancels_typing() {
    let transport = MockTransport::new();
    let system = start(&transport, "");
    idle().await;

    system.client.input("draft").await.unwrap();
    system.client.open("/?query=jaws&page=2").await.unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;

    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.search, "jaws");
    assert_eq!(snapshot.query, "jaws");
    assert_eq!(snapshot.page.get(), 2);
    assert_eq!(
        transport.urls(),
        vec![listing_url(1), search_url("jaws", 2)]
    );

    system.client.back().await.unwrap();
    idle().await;
    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.query, "");
    assert_eq!(snapshot.url, "page=1");
    assert_eq!(transport.urls().last(), Some(&listing_url(1)));

    system.shutdown().await.unwrap();
}
