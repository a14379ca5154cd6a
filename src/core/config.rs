//! Client configuration for the traits endpoint
//!
//! Values come from defaults, a TOML file, or environment variables, in
//! that order of ceremony. Everything is optional: a default config points
//! at a local development server.

use crate::core::error::{ForgeError, Result};
use std::path::Path;

/// Configuration for the trait catalog client
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the game API, with trailing slash
    ///
    /// The traits endpoint is resolved as
    /// `{api_url}v1/traits?shardID={shard_id}`, so the slash matters.
    pub api_url: String,

    /// Shard whose trait catalog to fetch
    ///
    /// Trait data can differ between shards during test cycles.
    pub shard_id: u32,

    /// Per-request timeout for the catalog fetch, in seconds
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8788/".into(),
            shard_id: 1,
            request_timeout_secs: 10,
        }
    }
}

impl ClientConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from environment variables
    ///
    /// Optional: TRAITS_API_URL, TRAITS_SHARD_ID, TRAITS_TIMEOUT_SECS.
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("TRAITS_API_URL") {
            config.api_url = url;
        }
        if let Ok(shard) = std::env::var("TRAITS_SHARD_ID") {
            config.shard_id = shard.parse().map_err(|_| {
                ForgeError::ConfigError(format!("TRAITS_SHARD_ID is not a number: {}", shard))
            })?;
        }
        if let Ok(timeout) = std::env::var("TRAITS_TIMEOUT_SECS") {
            config.request_timeout_secs = timeout.parse().map_err(|_| {
                ForgeError::ConfigError(format!("TRAITS_TIMEOUT_SECS is not a number: {}", timeout))
            })?;
        }
        Ok(config)
    }

    /// Load a config from a TOML file
    ///
    /// Expected shape (all keys optional):
    ///
    /// ```toml
    /// [api]
    /// url = "https://api.example.com/"
    /// shard = 1
    /// timeout_secs = 10
    /// ```
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    fn from_toml(content: &str) -> Result<Self> {
        let toml: toml::Value = content
            .parse()
            .map_err(|e| ForgeError::ConfigError(format!("Invalid TOML: {}", e)))?;

        let mut config = Self::default();
        if let Some(api) = toml.get("api").and_then(|v| v.as_table()) {
            if let Some(url) = api.get("url").and_then(|v| v.as_str()) {
                config.api_url = url.to_string();
            }
            if let Some(shard) = api.get("shard").and_then(|v| v.as_integer()) {
                config.shard_id = shard as u32;
            }
            if let Some(timeout) = api.get("timeout_secs").and_then(|v| v.as_integer()) {
                config.request_timeout_secs = timeout as u64;
            }
        }
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.api_url.is_empty() {
            return Err(ForgeError::ConfigError("api_url is empty".into()));
        }
        if !self.api_url.ends_with('/') {
            return Err(ForgeError::ConfigError(format!(
                "api_url ({}) must end with '/' so the traits path can be appended",
                self.api_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ForgeError::ConfigError(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.shard_id, 1);
    }

    #[test]
    fn test_from_toml_full() {
        let toml_str = r#"
[api]
url = "https://traits.example.com/"
shard = 4
timeout_secs = 30
"#;
        let config = ClientConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.api_url, "https://traits.example.com/");
        assert_eq!(config.shard_id, 4);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_from_toml_partial_keeps_defaults() {
        let toml_str = r#"
[api]
shard = 2
"#;
        let config = ClientConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.shard_id, 2);
        assert_eq!(config.api_url, ClientConfig::default().api_url);
        assert_eq!(
            config.request_timeout_secs,
            ClientConfig::default().request_timeout_secs
        );
    }

    #[test]
    fn test_from_toml_invalid() {
        assert!(ClientConfig::from_toml("not = [valid").is_err());
    }

    #[test]
    fn test_validate_requires_trailing_slash() {
        let config = ClientConfig {
            api_url: "https://traits.example.com".into(),
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = ClientConfig {
            request_timeout_secs: 0,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
