//! Link handling for Confluence pages
//!
//! This module recognizes page identifiers inside URLs and finds hyperlinks
//! inside page HTML, which together drive discovery of embedded pages.

mod extract;
mod scan;

pub use extract::{extract_id_from_url, synthesize_viewpage_url};
pub use scan::{scan_for_links, scan_page_links, PageLink};
