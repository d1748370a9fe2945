mod common;

use axum_test::TestServer;
use common::{InMemoryLinkRecords, InMemorySettings};
use serde_json::{Value, json};
use std::sync::Arc;

fn make_server(links: Arc<InMemoryLinkRecords>) -> TestServer {
    let state = common::create_test_state(links, Arc::new(InMemorySettings::default()));
    TestServer::new(common::create_test_app(state)).unwrap()
}

#[tokio::test]
async fn test_presave_rewrites_rich_text_fields() {
    let links = Arc::new(InMemoryLinkRecords::default());
    let server = make_server(links.clone());

    let response = server
        .post("/api/entities/presave")
        .json(&json!({
            "entity_type": "node",
            "fields": [
                {
                    "name": "body",
                    "kind": "text_with_summary",
                    "items": [{
                        "value": r#"<p><a href="http://google.com/">Hello world</a></p>"#,
                        "summary": r#"<a href="http://summary.example/">Summary</a>"#
                    }]
                },
                {
                    "name": "caption",
                    "kind": "text",
                    "items": [
                        { "value": r#"<a href="http://google.com/">Again</a>"# },
                        { "value": "plain" }
                    ]
                },
                {
                    "name": "source",
                    "kind": "string",
                    "items": [{ "value": r#"<a href="http://example.org/">Untouched</a>"# }]
                }
            ]
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let fields = &body["fields"];

    assert_eq!(body["entity_type"], "node");
    assert_eq!(
        fields[0]["items"][0]["value"],
        r#"<p><a href="/admin/content/linky/1">Hello world</a></p>"#
    );
    assert_eq!(
        fields[0]["items"][0]["summary"],
        r#"<a href="http://summary.example/">Summary</a>"#
    );
    assert_eq!(
        fields[1]["items"][0]["value"],
        r#"<a href="/admin/content/linky/1">Again</a>"#
    );
    assert_eq!(fields[1]["items"][1]["value"], "plain");
    assert_eq!(
        fields[2]["items"][0]["value"],
        r#"<a href="http://example.org/">Untouched</a>"#
    );

    assert_eq!(links.all().len(), 1);
}

#[tokio::test]
async fn test_presave_missing_entity_type() {
    let server = make_server(Arc::new(InMemoryLinkRecords::default()));

    let response = server
        .post("/api/entities/presave")
        .json(&json!({ "entity_type": "", "fields": [] }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "validation_error");
}
