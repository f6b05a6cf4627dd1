use crate::config::types::{Config, RawSettings};
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::{Path, PathBuf};

/// Optional non-secret settings file inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

/// Required credentials file inside the config directory
pub const SECRETS_FILE: &str = ".secrets.toml";

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "WIKIDOWN_CONFIG_DIR";

/// Config directory used when nothing else is given
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Picks the config directory: explicit path, then `WIKIDOWN_CONFIG_DIR`,
/// then `./config`
pub fn resolve_config_dir(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR))
}

/// Parses the contents of one settings file
pub fn parse_settings(content: &str) -> Result<RawSettings, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Loads, merges and validates the settings in `dir`
///
/// # Arguments
///
/// * `dir` - Directory holding `config.toml` and `.secrets.toml`
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - The secrets file is missing, a file failed to
///   parse, or validation failed
pub fn load_config(dir: &Path) -> Result<Config, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    let secrets_path = dir.join(SECRETS_FILE);

    let settings = if config_path.exists() {
        tracing::debug!("Reading {}", config_path.display());
        parse_settings(&std::fs::read_to_string(&config_path)?)?
    } else {
        RawSettings::default()
    };

    if !secrets_path.exists() {
        return Err(ConfigError::SecretsNotFound(
            secrets_path.display().to_string(),
        ));
    }

    tracing::debug!("Reading {}", secrets_path.display());
    let secrets = parse_settings(&std::fs::read_to_string(&secrets_path)?)?;

    validate(settings.merge(secrets))
}
