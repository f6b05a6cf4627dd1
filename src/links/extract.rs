use crate::client::PageId;
use crate::LinkError;
use regex::Regex;
use std::sync::LazyLock;

/// Canonical form: `.../pages/<id>` followed by `/` or the end of the URL
static PATH_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/pages/(\d+)(?:/|$)").expect("Failed to compile page path regex")
});

/// Legacy form: `...viewpage.action?pageId=<id>`
static QUERY_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[?&]pageId=(\d+)").expect("Failed to compile pageId query regex")
});

/// Extracts a page identifier from a Confluence URL
///
/// Two shapes are recognized, tried in order:
/// 1. a `/pages/<digits>` path segment, e.g.
///    `https://site/wiki/spaces/ENG/pages/123456/Title`
/// 2. a `pageId=<digits>` query parameter, e.g.
///    `https://site/wiki/pages/viewpage.action?pageId=123456`
///
/// Relative hrefs work too since matching is done on the raw string.
///
/// # Errors
///
/// Returns `LinkError::NoPageId` when neither shape matches. That is the
/// normal outcome for links that do not point at a page.
///
/// # Example
///
/// ```
/// use wikidown::extract_id_from_url;
///
/// let id = extract_id_from_url("https://x.atlassian.net/wiki/spaces/A/pages/42/Home").unwrap();
/// assert_eq!(id.as_str(), "42");
/// assert!(extract_id_from_url("https://example.com/about").is_err());
/// ```
pub fn extract_id_from_url(url: &str) -> Result<PageId, LinkError> {
    PATH_FORM
        .captures(url)
        .or_else(|| QUERY_FORM.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|id| PageId::new(id.as_str()))
        .ok_or_else(|| LinkError::NoPageId(url.to_string()))
}

/// Builds the `viewpage.action` URL for a page id under a site base URL
pub fn synthesize_viewpage_url(base_url: &str, id: &PageId) -> String {
    format!(
        "{}/pages/viewpage.action?pageId={}",
        base_url.trim_end_matches('/'),
        id
    )
}
