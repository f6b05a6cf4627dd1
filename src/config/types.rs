use serde::Deserialize;
use std::fmt;

/// Settings as read from a single TOML file
///
/// Every key is optional here; `validate` decides what is required once
/// both files are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawSettings {
    /// Site base URL, e.g. `https://company.atlassian.net/wiki`
    #[serde(rename = "base-url")]
    pub base_url: Option<String>,

    /// Account used for basic auth
    pub username: Option<String>,

    /// API token used as the basic auth password
    #[serde(rename = "api-token")]
    pub api_token: Option<String>,
}

impl RawSettings {
    /// Layers `overrides` on top of `self`, key by key
    pub fn merge(self, overrides: RawSettings) -> RawSettings {
        RawSettings {
            base_url: overrides.base_url.or(self.base_url),
            username: overrides.username.or(self.username),
            api_token: overrides.api_token.or(self.api_token),
        }
    }
}

/// Validated site configuration
#[derive(Clone)]
pub struct Config {
    /// Site base URL without a trailing slash
    pub base_url: String,
    pub username: String,
    pub api_token: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("api_token", &"<redacted>")
            .finish()
    }
}
