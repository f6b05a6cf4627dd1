//! Per-frame traversal context and failure descriptions

use crate::client::PageId;
use crate::StoreError;
use std::fmt;
use std::path::PathBuf;

/// How a page was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// The run's entry point
    Root,
    /// Listed as a child by the store
    Child,
    /// Linked from another page's HTML
    Embedded,
}

/// The page a node was discovered from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRef {
    pub id: PageId,
    pub title: String,
}

/// Edge kind plus the ancestry needed to describe the node in diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edge {
    Root,
    Child {
        /// Title from the parent's child listing
        title: String,
        parent: ParentRef,
    },
    Embedded {
        parent: ParentRef,
    },
}

impl Edge {
    pub fn kind(&self) -> EdgeKind {
        match self {
            Edge::Root => EdgeKind::Root,
            Edge::Child { .. } => EdgeKind::Child,
            Edge::Embedded { .. } => EdgeKind::Embedded,
        }
    }
}

/// A pending visit on the traversal work stack
#[derive(Debug, Clone)]
pub struct Frame {
    pub id: PageId,

    /// URL the page was reached by; used as the page's source reference
    pub url: String,

    /// Distance from the root, which sits at depth 1
    pub depth: u32,

    /// Directory the sink returned for the discovering parent
    pub parent_dir: Option<PathBuf>,

    pub edge: Edge,
}

impl Frame {
    pub fn root(id: PageId, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            depth: 1,
            parent_dir: None,
            edge: Edge::Root,
        }
    }
}

/// A page that could not be fetched during traversal
///
/// The `Display` form is the single diagnostic line reported for the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeFailure {
    pub id: PageId,
    pub url: String,
    pub depth: u32,
    pub edge: Edge,
    pub error: StoreError,
}

impl NodeFailure {
    pub fn from_frame(frame: Frame, error: StoreError) -> Self {
        Self {
            id: frame.id,
            url: frame.url,
            depth: frame.depth,
            edge: frame.edge,
            error,
        }
    }
}

impl fmt::Display for NodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.edge {
            Edge::Root => write!(f, "Could not access page id {}: {}", self.id, self.error),
            Edge::Child { title, parent } => write!(
                f,
                "Could not access child page '{}' (id {}) of parent '{}' (id {}) at depth {}: {}",
                title, self.id, parent.title, parent.id, self.depth, self.error
            ),
            Edge::Embedded { parent } => write!(
                f,
                "Could not access embedded link '{}' (extracted id {}) in page '{}' (id {}) at depth {}: {}",
                self.url, self.id, parent.title, parent.id, self.depth, self.error
            ),
        }
    }
}
