//! Confluence REST client
//!
//! This module handles all HTTP requests to a Confluence site, including:
//! - Building the HTTP client with a user agent and timeouts
//! - Fetching page content with the storage-format body expanded
//! - Paging through child listings
//! - Classifying failures into not-found vs. API errors

use crate::client::types::{ChildPage, PageId, PageRecord, PageStore, DEFAULT_CHILD_TITLE};
use crate::config::Config;
use crate::{StoreError, StoreResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Number of children requested per listing call
pub const DEFAULT_CHILD_PAGE_SIZE: usize = 100;

/// Longest slice of an error body echoed into an error message
const ERROR_BODY_EXCERPT: usize = 200;

/// Builds the HTTP client used for every store request
///
/// # Example
///
/// ```no_run
/// use wikidown::client::build_http_client;
///
/// let client = build_http_client().unwrap();
/// ```
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(format!("wikidown/{}", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Page payload of `GET /rest/api/content/{id}`
#[derive(Debug, Deserialize)]
struct ContentResponse {
    title: Option<String>,
    body: Option<ContentBody>,
}

#[derive(Debug, Deserialize)]
struct ContentBody {
    storage: Option<StorageValue>,
}

#[derive(Debug, Deserialize)]
struct StorageValue {
    value: Option<String>,
}

/// Page payload of `GET /rest/api/content/{id}/child/page`
#[derive(Debug, Deserialize)]
struct ChildListing {
    #[serde(default)]
    results: Vec<ChildEntry>,
    #[serde(default, rename = "_links")]
    links: ListingLinks,
}

#[derive(Debug, Deserialize)]
struct ChildEntry {
    id: String,
    title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ListingLinks {
    next: Option<String>,
}

impl From<ChildEntry> for ChildPage {
    fn from(entry: ChildEntry) -> Self {
        ChildPage {
            id: PageId::new(entry.id),
            title: entry
                .title
                .unwrap_or_else(|| DEFAULT_CHILD_TITLE.to_string()),
        }
    }
}

/// Confluence Cloud REST API client
///
/// Constructed once per run and shared by reference with the traversal
/// engine.
pub struct ConfluenceClient {
    http: Client,
    base_url: String,
    username: String,
    api_token: String,
    child_page_size: usize,
}

impl ConfluenceClient {
    /// Creates a client for the site described by `config`
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: build_http_client()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            api_token: config.api_token.clone(),
            child_page_size: DEFAULT_CHILD_PAGE_SIZE,
        })
    }

    /// Overrides how many children are requested per listing call
    pub fn with_child_page_size(mut self, size: usize) -> Self {
        self.child_page_size = size.max(1);
        self
    }

    /// The site base URL, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends an authenticated GET and decodes the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        id: &PageId,
        url: &str,
        query: &[(&str, String)],
    ) -> StoreResult<T> {
        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .http
            .get(url)
            .basic_auth(&self.username, Some(&self.api_token))
            .query(query)
            .send()
            .await
            .map_err(|e| transport_error(id, &e))?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound { id: id.to_string() });
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(StoreError::Api {
                id: id.to_string(),
                message: "Rate limited (HTTP 429)".to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let excerpt: String = body.trim().chars().take(ERROR_BODY_EXCERPT).collect();
            return Err(StoreError::Api {
                id: id.to_string(),
                message: if excerpt.is_empty() {
                    format!("HTTP {}", status.as_u16())
                } else {
                    format!("HTTP {}: {}", status.as_u16(), excerpt)
                },
            });
        }

        response.json::<T>().await.map_err(|e| StoreError::Api {
            id: id.to_string(),
            message: format!("Malformed response: {}", e),
        })
    }
}

/// Maps a reqwest failure onto `StoreError::Api`
fn transport_error(id: &PageId, error: &reqwest::Error) -> StoreError {
    let message = if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else {
        error.to_string()
    };

    StoreError::Api {
        id: id.to_string(),
        message,
    }
}

/// Child listings only ever fail with `StoreError::Api`; a 404 there means
/// the parent vanished, not that a child is missing
fn listing_error(error: StoreError) -> StoreError {
    match error {
        StoreError::NotFound { id } => StoreError::Api {
            id,
            message: "HTTP 404".to_string(),
        },
        other => other,
    }
}

#[async_trait]
impl PageStore for ConfluenceClient {
    async fn fetch_page(&self, id: &PageId) -> StoreResult<PageRecord> {
        let url = format!("{}/rest/api/content/{}", self.base_url, id);
        let query = [("expand", "body.storage,version,ancestors".to_string())];

        let content: ContentResponse = self.get_json(id, &url, &query).await?;
        let body_html = content
            .body
            .and_then(|body| body.storage)
            .and_then(|storage| storage.value);

        Ok(PageRecord::new(id.clone(), content.title, body_html))
    }

    async fn fetch_children(&self, id: &PageId) -> StoreResult<Vec<ChildPage>> {
        let url = format!("{}/rest/api/content/{}/child/page", self.base_url, id);
        let mut children = Vec::new();
        let mut start = 0usize;

        loop {
            let query = [
                ("limit", self.child_page_size.to_string()),
                ("start", start.to_string()),
            ];
            let listing: ChildListing = self
                .get_json(id, &url, &query)
                .await
                .map_err(listing_error)?;
            let count = listing.results.len();

            children.extend(listing.results.into_iter().map(ChildPage::from));

            if count == 0 || listing.links.next.is_none() {
                break;
            }
            start += count;
        }

        tracing::debug!("Page {} has {} children", id, children.len());
        Ok(children)
    }
}
