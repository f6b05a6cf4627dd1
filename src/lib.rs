//! Wikidown: converts a tree of Confluence pages into Markdown
//!
//! This crate walks a remote page graph (child pages and in-page links to
//! other pages) up to a bounded depth and writes every page it reaches either
//! as a nested directory tree of `index.md` files or into one concatenated
//! Markdown document.

pub mod client;
pub mod config;
pub mod convert;
pub mod links;
pub mod output;
pub mod sanitize;
pub mod traversal;

use thiserror::Error;

/// Main error type for Wikidown operations
#[derive(Debug, Error)]
pub enum WikidownError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Link(#[from] LinkError),

    #[error("{0}")]
    Node(Box<traversal::NodeFailure>),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Secrets file not found at {0}. Create it with `username` and `api-token` entries.")]
    SecretsNotFound(String),

    #[error("Missing required secrets: {0}")]
    MissingSecrets(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Failures reported by a page store
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The id does not resolve to a page
    #[error("Page with id {id} not found.")]
    NotFound { id: String },

    /// Transport, authentication or rate-limit failure
    #[error("API error for page {id}: {message}")]
    Api { id: String, message: String },
}

/// Link-recognition outcomes
///
/// `NoPageId` is an expected result for ordinary links; callers scanning
/// HTML skip those links instead of reporting them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("Could not extract page id from URL: {0}")]
    NoPageId(String),
}

/// Result type alias for Wikidown operations
pub type Result<T> = std::result::Result<T, WikidownError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for page store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// Re-export commonly used types
pub use client::{ChildPage, ConfluenceClient, PageId, PageRecord, PageStore};
pub use config::Config;
pub use convert::{Converter, Html2MdConverter};
pub use links::{extract_id_from_url, scan_for_links, synthesize_viewpage_url};
pub use output::{MultiFileSink, PageSink, SingleFileSink};
pub use sanitize::{sanitize, sanitize_filename};
pub use traversal::{ErrorPolicy, TraversalReport, Traverser};
