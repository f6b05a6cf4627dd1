use crate::StoreResult;
use async_trait::async_trait;
use std::fmt;

/// Title used when the store returns a page without one
pub const DEFAULT_TITLE: &str = "confluence_page";

/// Title used when a child listing entry has no title
pub const DEFAULT_CHILD_TITLE: &str = "unknown";

/// Opaque identifier of a page within the store
///
/// Equality is exact string match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(String);

impl PageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A materialized page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub id: PageId,

    /// Page title, `DEFAULT_TITLE` when the store has none
    pub title: String,

    /// Storage-format HTML body, empty when the store has none
    pub body_html: String,
}

impl PageRecord {
    /// Builds a record, applying defaults for missing title and body
    pub fn new(id: PageId, title: Option<String>, body_html: Option<String>) -> Self {
        Self {
            id,
            title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            body_html: body_html.unwrap_or_default(),
        }
    }
}

/// An entry of a page's direct-children listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildPage {
    pub id: PageId,
    pub title: String,
}

/// Remote page store operations needed by the traversal engine
///
/// Implementations report a page that does not exist as
/// `StoreError::NotFound` and every other failure as `StoreError::Api`.
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Fetches a page's title and HTML body
    async fn fetch_page(&self, id: &PageId) -> StoreResult<PageRecord>;

    /// Lists the direct children of a page in store order
    ///
    /// An empty listing is a valid result.
    async fn fetch_children(&self, id: &PageId) -> StoreResult<Vec<ChildPage>>;
}
