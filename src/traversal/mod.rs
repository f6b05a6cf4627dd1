//! Traversal engine
//!
//! This module contains the walk over the remote page graph:
//! - Depth and visited-set bounds
//! - Fan-out over child pages and embedded page links
//! - Per-node failure isolation
//! - Hand-off of every fetched page to a `PageSink`

mod context;
mod engine;
mod report;

pub use context::{Edge, EdgeKind, Frame, NodeFailure, ParentRef};
pub use engine::{ErrorPolicy, Traverser, DEFAULT_MAX_DEPTH};
pub use report::TraversalReport;
