use crate::config::types::{Config, RawSettings};
use crate::ConfigError;
use url::Url;

/// Validates merged settings and produces a `Config`
pub fn validate(settings: RawSettings) -> Result<Config, ConfigError> {
    let username = non_empty(settings.username);
    let api_token = non_empty(settings.api_token);

    let missing: Vec<&str> = [("username", username.is_none()), ("api-token", api_token.is_none())]
        .into_iter()
        .filter_map(|(key, absent)| absent.then_some(key))
        .collect();

    if !missing.is_empty() {
        return Err(ConfigError::MissingSecrets(missing.join(", ")));
    }

    let base_url = non_empty(settings.base_url)
        .ok_or_else(|| ConfigError::Validation("base-url is required".to_string()))?;
    validate_base_url(&base_url)?;

    Ok(Config {
        base_url: base_url.trim_end_matches('/').to_string(),
        username: username.unwrap_or_default(),
        api_token: api_token.unwrap_or_default(),
    })
}

/// Treats blank strings as absent
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validates that the base URL is an absolute http(s) URL
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", base_url, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            other
        ))),
    }
}
