//! Shared mock-server fixtures

use serde_json::json;
use wikidown::Config;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// `Authorization` header for `user@example.com:token123`
pub const AUTH_HEADER: &str = "Basic dXNlckBleGFtcGxlLmNvbTp0b2tlbjEyMw==";

/// Creates a site configuration pointing at the mock server
pub fn config_for(server: &MockServer) -> Config {
    Config {
        base_url: format!("{}/wiki", server.uri()),
        username: "user@example.com".to_string(),
        api_token: "token123".to_string(),
    }
}

/// Viewpage URL for a page on the mock site
pub fn viewpage_url(server: &MockServer, id: &str) -> String {
    format!("{}/wiki/pages/viewpage.action?pageId={}", server.uri(), id)
}

/// Anchor pointing at another page on the mock site
pub fn page_link(server: &MockServer, id: &str, text: &str) -> String {
    format!(r#"<a href="{}">{}</a>"#, viewpage_url(server, id), text)
}

/// Serves a page with the given title and storage-format body
pub async fn mount_page(server: &MockServer, id: &str, title: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/wiki/rest/api/content/{}", id)))
        .and(header("authorization", AUTH_HEADER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": id,
            "type": "page",
            "title": title,
            "body": { "storage": { "value": html, "representation": "storage" } }
        })))
        .mount(server)
        .await;
}

/// Serves a page request with an error status
pub async fn mount_page_status(server: &MockServer, id: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/wiki/rest/api/content/{}", id)))
        .respond_with(ResponseTemplate::new(status).set_body_string("{\"message\":\"denied\"}"))
        .mount(server)
        .await;
}

/// Serves a single, complete child listing for a page
pub async fn mount_children(server: &MockServer, id: &str, children: &[(&str, &str)]) {
    let results: Vec<_> = children
        .iter()
        .map(|(child_id, title)| json!({ "id": child_id, "type": "page", "title": title }))
        .collect();

    Mock::given(method("GET"))
        .and(path(format!("/wiki/rest/api/content/{}/child/page", id)))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": results,
            "start": 0,
            "limit": 100,
            "size": children.len(),
            "_links": {}
        })))
        .mount(server)
        .await;
}
