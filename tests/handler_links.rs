mod common;

use axum_test::TestServer;
use common::{InMemoryLinkRecords, InMemorySettings};
use serde_json::Value;
use std::sync::Arc;

fn make_server(links: Arc<InMemoryLinkRecords>) -> TestServer {
    let state = common::create_test_state(links, Arc::new(InMemorySettings::default()));
    TestServer::new(common::create_test_app(state)).unwrap()
}

#[tokio::test]
async fn test_list_links_newest_first() {
    let links = Arc::new(InMemoryLinkRecords::default());
    for i in 1..=3 {
        links.insert(&format!("http://example.com/{i}"), &format!("Link {i}"));
    }
    let server = make_server(links);

    let response = server.get("/api/links?page=1&page_size=2").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["pagination"]["total_items"], 3);
    assert_eq!(body["pagination"]["total_pages"], 2);

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], 3);
    assert_eq!(items[0]["href"], "/admin/content/linky/3");
    assert_eq!(items[0]["label"], "Link 3 (http://example.com/3)");
    assert_eq!(items[1]["id"], 2);

    let page_2: Value = server.get("/api/links?page=2&page_size=2").await.json();
    assert_eq!(page_2["items"][0]["id"], 1);
}

#[tokio::test]
async fn test_list_links_invalid_page_size() {
    let server = make_server(Arc::new(InMemoryLinkRecords::default()));

    let response = server.get("/api/links?page_size=1001").await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_get_link() {
    let links = Arc::new(InMemoryLinkRecords::default());
    links.insert("http://google.com/", "Hello world");
    let server = make_server(links);

    let response = server.get("/api/links/1").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["uri"], "http://google.com/");
    assert_eq!(body["title"], "Hello world");
    assert_eq!(body["href"], "/admin/content/linky/1");
}

#[tokio::test]
async fn test_get_link_not_found() {
    let server = make_server(Arc::new(InMemoryLinkRecords::default()));

    let response = server.get("/api/links/99").await;

    response.assert_status_not_found();
}
