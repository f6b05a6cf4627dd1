//! Page sink trait and output errors
//!
//! A sink is invoked once for every page the traversal engine materializes.
//! It decides where the page's Markdown goes and hands back the directory
//! the page's descendants should nest under (if the strategy nests at all).

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing output
///
/// These are fatal for a run: the engine does not catch them.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A converted page ready to be written
#[derive(Debug, Clone, Copy)]
pub struct PageOutput<'a> {
    /// Page title as returned by the store
    pub title: &'a str,

    /// The URL the page was reached by
    pub url: &'a str,

    /// Converted Markdown body
    pub markdown: &'a str,

    /// Traversal depth, 1 for the root
    pub depth: u32,
}

/// Output strategy invoked once per successfully fetched page
pub trait PageSink {
    /// Writes one page
    ///
    /// # Arguments
    ///
    /// * `page` - The converted page
    /// * `parent_dir` - Directory returned by this sink for the page's
    ///   discovering parent, `None` for the root
    ///
    /// # Returns
    ///
    /// The directory the page's descendants should be nested under, or
    /// `None` when the strategy does not nest.
    fn accept(
        &mut self,
        page: &PageOutput<'_>,
        parent_dir: Option<&Path>,
    ) -> OutputResult<Option<PathBuf>>;
}
