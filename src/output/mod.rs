//! Output module for writing converted pages
//!
//! This module handles:
//! - The `PageSink` strategy interface used by the traversal engine
//! - Multi-file output (a directory tree of `index.md` files)
//! - Single-file output (one concatenated document)
//! - Plain single-page output

mod single;
mod traits;
mod tree;

pub use single::{write_section, SingleFileSink, SECTION_SEPARATOR};
pub use traits::{OutputError, OutputResult, PageOutput, PageSink};
pub use tree::{write_page_file, MultiFileSink, INDEX_FILE};
