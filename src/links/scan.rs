//! Hyperlink discovery in page HTML

use crate::client::PageId;
use crate::links::extract_id_from_url;
use scraper::{Html, Selector};

/// A hyperlink that points at another page in the same store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    /// The literal href as written in the page
    pub href: String,

    /// The page identifier recognized in the href
    pub id: PageId,
}

/// Returns the `href` of every anchor in an HTML fragment, in document order
///
/// Anchors without an `href` attribute are skipped. No resolution or
/// filtering happens here; hrefs are returned exactly as written.
///
/// # Example
///
/// ```
/// use wikidown::scan_for_links;
///
/// let hrefs = scan_for_links(r#"<p><a href="/a">A</a><a name="x">B</a></p>"#);
/// assert_eq!(hrefs, vec!["/a".to_string()]);
/// ```
pub fn scan_for_links(html: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);

    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    fragment
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Finds every hyperlink in `html` that points at another page
///
/// Links whose href carries no recognizable page id are dropped silently.
pub fn scan_page_links(html: &str) -> Vec<PageLink> {
    scan_for_links(html)
        .into_iter()
        .filter_map(|href| match extract_id_from_url(&href) {
            Ok(id) => Some(PageLink { href, id }),
            Err(e) => {
                tracing::trace!("Skipping link: {}", e);
                None
            }
        })
        .collect()
}
