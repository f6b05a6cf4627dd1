//! Confluence client behavior against a mock server

use crate::support::{config_for, mount_children, mount_page, mount_page_status, AUTH_HEADER};
use serde_json::json;
use wikidown::{Config, ConfluenceClient, PageId, PageStore, StoreError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_page_success() {
    let server = MockServer::start().await;
    mount_page(&server, "123", "Test Page", "<h1>Hello</h1>").await;

    let client = ConfluenceClient::new(&config_for(&server)).unwrap();
    let page = client.fetch_page(&PageId::new("123")).await.unwrap();

    assert_eq!(page.id, PageId::new("123"));
    assert_eq!(page.title, "Test Page");
    assert_eq!(page.body_html, "<h1>Hello</h1>");
}

#[tokio::test]
async fn test_fetch_page_requests_storage_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wiki/rest/api/content/5"))
        .and(query_param("expand", "body.storage,version,ancestors"))
        .and(header("authorization", AUTH_HEADER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "5" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ConfluenceClient::new(&config_for(&server)).unwrap();
    let page = client.fetch_page(&PageId::new("5")).await.unwrap();

    assert_eq!(page.title, "confluence_page");
    assert_eq!(page.body_html, "");
}

#[tokio::test]
async fn test_fetch_page_not_found() {
    let server = MockServer::start().await;
    mount_page_status(&server, "123", 404).await;

    let client = ConfluenceClient::new(&config_for(&server)).unwrap();
    let err = client.fetch_page(&PageId::new("123")).await.unwrap_err();

    assert_eq!(err, StoreError::NotFound { id: "123".to_string() });
    assert_eq!(err.to_string(), "Page with id 123 not found.");
}

#[tokio::test]
async fn test_fetch_page_api_errors() {
    let server = MockServer::start().await;
    mount_page_status(&server, "1", 401).await;
    mount_page_status(&server, "2", 429).await;
    mount_page_status(&server, "3", 500).await;

    let client = ConfluenceClient::new(&config_for(&server)).unwrap();

    for (id, expected) in [
        ("1", "HTTP 401"),
        ("2", "Rate limited (HTTP 429)"),
        ("3", "HTTP 500"),
    ] {
        match client.fetch_page(&PageId::new(id)).await {
            Err(StoreError::Api { id: err_id, message }) => {
                assert_eq!(err_id, id);
                assert!(message.starts_with(expected), "unexpected message {:?}", message);
            }
            other => panic!("expected API error for {}, got {:?}", id, other),
        }
    }
}

#[tokio::test]
async fn test_fetch_page_malformed_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wiki/rest/api/content/9"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let client = ConfluenceClient::new(&config_for(&server)).unwrap();
    let err = client.fetch_page(&PageId::new("9")).await.unwrap_err();

    assert!(matches!(err, StoreError::Api { ref message, .. } if message.starts_with("Malformed response")));
}

#[tokio::test]
async fn test_unreachable_server_is_api_error() {
    // Reserve a free port, then release it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = Config {
        base_url: format!("http://127.0.0.1:{}/wiki", port),
        username: "user@example.com".to_string(),
        api_token: "token123".to_string(),
    };

    let client = ConfluenceClient::new(&config).unwrap();
    let err = client.fetch_page(&PageId::new("1")).await.unwrap_err();

    assert!(
        matches!(err, StoreError::Api { ref id, ref message } if id == "1" && message.starts_with("Connection failed")),
        "unexpected error: {:?}",
        err
    );
}

#[tokio::test]
async fn test_fetch_children_in_order() {
    let server = MockServer::start().await;
    mount_children(&server, "42", &[("2", "Second"), ("1", "First")]).await;

    let client = ConfluenceClient::new(&config_for(&server)).unwrap();
    let children = client.fetch_children(&PageId::new("42")).await.unwrap();

    let listed: Vec<(&str, &str)> = children
        .iter()
        .map(|c| (c.id.as_str(), c.title.as_str()))
        .collect();
    assert_eq!(listed, vec![("2", "Second"), ("1", "First")]);
}

#[tokio::test]
async fn test_fetch_children_empty() {
    let server = MockServer::start().await;
    mount_children(&server, "42", &[]).await;

    let client = ConfluenceClient::new(&config_for(&server)).unwrap();
    let children = client.fetch_children(&PageId::new("42")).await.unwrap();

    assert!(children.is_empty());
}

#[tokio::test]
async fn test_fetch_children_follows_pagination() {
    let server = MockServer::start().await;
    let listing = "/wiki/rest/api/content/42/child/page";

    Mock::given(method("GET"))
        .and(path(listing))
        .and(query_param("start", "0"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "id": "1", "title": "One" }, { "id": "2", "title": "Two" }],
            "_links": { "next": "/rest/api/content/42/child/page?limit=2&start=2" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(listing))
        .and(query_param("start", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "id": "3" }],
            "_links": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ConfluenceClient::new(&config_for(&server))
        .unwrap()
        .with_child_page_size(2);
    let children = client.fetch_children(&PageId::new("42")).await.unwrap();

    let ids: Vec<&str> = children.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert_eq!(children[2].title, "unknown");
}

#[tokio::test]
async fn test_fetch_children_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wiki/rest/api/content/42/child/page"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = ConfluenceClient::new(&config_for(&server)).unwrap();
    let err = client.fetch_children(&PageId::new("42")).await.unwrap_err();

    assert!(matches!(err, StoreError::Api { .. }));
}

#[tokio::test]
async fn test_fetch_children_of_missing_page_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wiki/rest/api/content/77/child/page"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = ConfluenceClient::new(&config_for(&server)).unwrap();
    let err = client.fetch_children(&PageId::new("77")).await.unwrap_err();

    assert_eq!(
        err,
        StoreError::Api {
            id: "77".to_string(),
            message: "HTTP 404".to_string(),
        }
    );
}
