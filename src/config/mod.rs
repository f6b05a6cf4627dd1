//! Configuration module for Wikidown
//!
//! Site settings live in a config directory holding two TOML files:
//! `config.toml` (optional, non-secret settings such as `base-url`) and
//! `.secrets.toml` (required, `username` and `api-token`). Values from the
//! secrets file take precedence.
//!
//! # Example
//!
//! ```no_run
//! use wikidown::config::{load_config, resolve_config_dir};
//!
//! let dir = resolve_config_dir(None);
//! let config = load_config(&dir).unwrap();
//! println!("Site: {}", config.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, RawSettings};

// Re-export parser functions
pub use parser::{
    load_config, parse_settings, resolve_config_dir, CONFIG_DIR_ENV, CONFIG_FILE,
    DEFAULT_CONFIG_DIR, SECRETS_FILE,
};
pub use validation::validate;
