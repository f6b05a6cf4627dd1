//! Depth-first walk over the page graph
//!
//! The walk runs on an explicit work stack rather than the call stack. After
//! a page is written, frames for its children (store order) and its embedded
//! page links (document order) are pushed in reverse, so pages are popped in
//! the same preorder a recursive walk would produce. Depth and visited checks
//! happen when a frame is popped, before any request is made.

use crate::client::{PageRecord, PageStore};
use crate::convert::{Converter, Html2MdConverter};
use crate::links::{scan_page_links, synthesize_viewpage_url};
use crate::output::{PageOutput, PageSink};
use crate::traversal::context::{Edge, Frame, NodeFailure, ParentRef};
use crate::traversal::report::TraversalReport;
use crate::{PageId, StoreError, WikidownError};
use std::collections::HashSet;

/// Depth limit used when none is configured; the root is depth 1
pub const DEFAULT_MAX_DEPTH: u32 = 3;

/// What to do when a non-root page cannot be fetched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Log the failure, skip that branch and keep walking
    #[default]
    Lenient,

    /// Stop the walk and return the failure
    Strict,
}

/// State of a single run; dropped when the run returns
#[derive(Default)]
struct Walk {
    visited: HashSet<PageId>,
    stack: Vec<Frame>,
    report: TraversalReport,
}

/// Walks a page tree and feeds every fetched page to a sink
///
/// # Example
///
/// ```no_run
/// use wikidown::{ConfluenceClient, MultiFileSink, PageId, Traverser};
///
/// # async fn example(client: &ConfluenceClient) -> wikidown::Result<()> {
/// let traverser = Traverser::new(client, client.base_url()).with_max_depth(2);
/// let mut sink = MultiFileSink::new("out");
/// let report = traverser
///     .run(&PageId::new("42"), "https://site/wiki/pages/42", &mut sink)
///     .await?;
/// println!("{} pages written", report.pages_written);
/// # Ok(())
/// # }
/// ```
pub struct Traverser<'a> {
    store: &'a dyn PageStore,
    converter: Box<dyn Converter>,
    site_url: String,
    max_depth: u32,
    policy: ErrorPolicy,
}

impl<'a> Traverser<'a> {
    /// Creates a traverser over `store`
    ///
    /// `site_url` is the base used to build viewpage URLs for child pages.
    pub fn new(store: &'a dyn PageStore, site_url: impl Into<String>) -> Self {
        Self {
            store,
            converter: Box::new(Html2MdConverter),
            site_url: site_url.into(),
            max_depth: DEFAULT_MAX_DEPTH,
            policy: ErrorPolicy::default(),
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_converter(mut self, converter: impl Converter + 'static) -> Self {
        self.converter = Box::new(converter);
        self
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Walks the tree rooted at `root_id`, fetching the root first
    ///
    /// A root that cannot be fetched is reported like any other node.
    pub async fn run(
        &self,
        root_id: &PageId,
        root_url: &str,
        sink: &mut dyn PageSink,
    ) -> crate::Result<TraversalReport> {
        let mut walk = Walk::default();
        walk.stack.push(Frame::root(root_id.clone(), root_url));
        self.drain(&mut walk, sink).await?;
        Ok(walk.report)
    }

    /// Walks the tree below a root page that has already been fetched
    pub async fn run_from_page(
        &self,
        root: PageRecord,
        root_url: &str,
        sink: &mut dyn PageSink,
    ) -> crate::Result<TraversalReport> {
        let mut walk = Walk::default();
        let frame = Frame::root(root.id.clone(), root_url);

        if self.admit(&mut walk, &frame) {
            self.visit(&mut walk, frame, root, sink).await?;
        }
        self.drain(&mut walk, sink).await?;
        Ok(walk.report)
    }

    /// Pops frames until the stack is empty
    async fn drain(&self, walk: &mut Walk, sink: &mut dyn PageSink) -> crate::Result<()> {
        while let Some(frame) = walk.stack.pop() {
            if !self.admit(walk, &frame) {
                continue;
            }

            match self.store.fetch_page(&frame.id).await {
                Ok(page) => self.visit(walk, frame, page, sink).await?,
                Err(error) => self.fail(walk, frame, error)?,
            }
        }
        Ok(())
    }

    /// Applies the depth and visited guards, marking the page visited
    ///
    /// Marking happens before the fetch so a page that fails is not retried
    /// through another edge.
    fn admit(&self, walk: &mut Walk, frame: &Frame) -> bool {
        if frame.depth > self.max_depth {
            tracing::trace!("Depth {} exceeds limit for page {}", frame.depth, frame.id);
            return false;
        }
        if !walk.visited.insert(frame.id.clone()) {
            tracing::debug!("Page {} already visited, skipping", frame.id);
            return false;
        }
        true
    }

    /// Records a fetch failure according to the error policy
    fn fail(&self, walk: &mut Walk, frame: Frame, error: StoreError) -> crate::Result<()> {
        let failure = NodeFailure::from_frame(frame, error);
        tracing::error!("{}", failure);

        match self.policy {
            ErrorPolicy::Lenient => {
                walk.report.failures.push(failure);
                Ok(())
            }
            ErrorPolicy::Strict => Err(WikidownError::Node(Box::new(failure))),
        }
    }

    /// Writes a fetched page and schedules its children and embedded links
    async fn visit(
        &self,
        walk: &mut Walk,
        frame: Frame,
        page: PageRecord,
        sink: &mut dyn PageSink,
    ) -> crate::Result<()> {
        tracing::info!("Converting '{}' (id {}, depth {})", page.title, page.id, frame.depth);

        let markdown = self.converter.to_markdown(&page.body_html);
        let page_dir = sink.accept(
            &PageOutput {
                title: &page.title,
                url: &frame.url,
                markdown: &markdown,
                depth: frame.depth,
            },
            frame.parent_dir.as_deref(),
        )?;
        walk.report.record_page(frame.depth);

        let next_depth = frame.depth + 1;
        if next_depth > self.max_depth {
            return Ok(());
        }

        let parent = ParentRef {
            id: page.id.clone(),
            title: page.title.clone(),
        };

        let children = match self.store.fetch_children(&page.id).await {
            Ok(children) => children,
            Err(e) => {
                tracing::warn!(
                    "Could not list children of '{}' (id {}): {}",
                    page.title,
                    page.id,
                    e
                );
                Vec::new()
            }
        };

        let child_frames = children.into_iter().map(|child| Frame {
            url: synthesize_viewpage_url(&self.site_url, &child.id),
            id: child.id,
            depth: next_depth,
            parent_dir: page_dir.clone(),
            edge: Edge::Child {
                title: child.title,
                parent: parent.clone(),
            },
        });

        let link_frames = scan_page_links(&page.body_html)
            .into_iter()
            .map(|link| Frame {
                id: link.id,
                url: link.href,
                depth: next_depth,
                parent_dir: page_dir.clone(),
                edge: Edge::Embedded {
                    parent: parent.clone(),
                },
            });

        let pending: Vec<Frame> = child_frames.chain(link_frames).collect();
        walk.stack.extend(pending.into_iter().rev());

        Ok(())
    }
}
