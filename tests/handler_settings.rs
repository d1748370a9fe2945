mod common;

use axum_test::TestServer;
use common::{InMemoryLinkRecords, InMemorySettings};
use serde_json::{Value, json};
use std::sync::Arc;

fn make_server() -> (TestServer, Arc<InMemoryLinkRecords>) {
    let links = Arc::new(InMemoryLinkRecords::default());
    let state = common::create_test_state(links.clone(), Arc::new(InMemorySettings::default()));
    (TestServer::new(common::create_test_app(state)).unwrap(), links)
}

#[tokio::test]
async fn test_get_settings_initially_empty() {
    let (server, _) = make_server();

    let response = server.get("/api/settings").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["internal_patterns"], "");
    assert_eq!(body["patterns"], json!([]));
    assert_eq!(body["version"], 0);
}

#[tokio::test]
async fn test_update_settings() {
    let (server, _) = make_server();

    let response = server
        .put("/api/settings")
        .json(&json!({ "internal_patterns": "*.example.com\n\nexample.org\n" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["patterns"], json!(["*.example.com", "example.org"]));
    assert_eq!(body["version"], 1);

    let current: Value = server.get("/api/settings").await.json();
    assert_eq!(current["version"], 1);
    assert_eq!(current["internal_patterns"], "*.example.com\n\nexample.org\n");
}

#[tokio::test]
async fn test_update_settings_rejects_conflicts() {
    let (server, _) = make_server();

    let response = server
        .put("/api/settings")
        .json(&json!({ "internal_patterns": "example.com\n*.example.com" }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(
        body["error"]["details"]["errors"],
        json!([
            "Cannot add *.example.com to domains as it matches against another broader rule: example.com"
        ])
    );

    let current: Value = server.get("/api/settings").await.json();
    assert_eq!(current["version"], 0);
}

#[tokio::test]
async fn test_validate_settings_does_not_save() {
    let (server, _) = make_server();

    let response = server
        .post("/api/settings/validate")
        .json(&json!({ "internal_patterns": "foo.example.com\n*.example.com" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["valid"], false);
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);

    let ok: Value = server
        .post("/api/settings/validate")
        .json(&json!({ "internal_patterns": "*.example.com\nexample.org" }))
        .await
        .json();
    assert_eq!(ok["valid"], true);
    assert_eq!(ok["errors"], json!([]));

    let current: Value = server.get("/api/settings").await.json();
    assert_eq!(current["version"], 0);
}

#[tokio::test]
async fn test_saved_patterns_apply_to_next_transform() {
    let (server, links) = make_server();
    let html = r#"<a href="http://www.example.com/">Example</a>"#;

    server
        .put("/api/settings")
        .json(&json!({ "internal_patterns": "*.example.com" }))
        .await
        .assert_status_ok();

    let body: Value = server
        .post("/api/transform")
        .json(&json!({ "html": html }))
        .await
        .json();

    assert_eq!(body["html"], html);
    assert!(links.all().is_empty());
}
