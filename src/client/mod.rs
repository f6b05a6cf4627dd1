//! Page store access
//!
//! This module defines the interface the traversal engine needs from a
//! remote page store, plus the Confluence REST implementation:
//! - `PageStore`: fetch a page, list its direct children
//! - `ConfluenceClient`: the same over HTTP with basic auth and pagination

mod confluence;
mod types;

pub use confluence::{build_http_client, ConfluenceClient};
pub use types::{ChildPage, PageId, PageRecord, PageStore, DEFAULT_CHILD_TITLE, DEFAULT_TITLE};
