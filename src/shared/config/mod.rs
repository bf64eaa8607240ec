//! Application configuration module
//!
//! Provides the file/builder layer of the client configuration. Environment
//! overrides and defaults are applied on top of this by `app::config::Config`.

use std::path::PathBuf;

use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend base URL, including any path prefix such as `/api`
    pub api_url: Option<String>,
    /// Directory holding the persisted session
    pub storage_dir: Option<PathBuf>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Parse a TOML configuration file body
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.api_url {
            validate_url(url)?;
        }
        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::MissingValue("request_timeout_secs"));
        }
        Ok(())
    }

    /// Overlay `other` on top of `self`; values set in `other` win.
    pub fn merge(self, other: AppConfig) -> AppConfig {
        AppConfig {
            api_url: other.api_url.or(self.api_url),
            storage_dir: other.storage_dir.or(self.storage_dir),
            request_timeout_secs: other.request_timeout_secs.or(self.request_timeout_secs),
        }
    }
}

fn validate_url(url: &str) -> Result<(), ConfigError> {
    let parsed = Url::parse(url).map_err(|e| ConfigError::InvalidUrl(format!("{url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidUrl(format!(
            "{url}: unsupported scheme '{other}'"
        ))),
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    api_url: Option<String>,
    storage_dir: Option<PathBuf>,
    request_timeout_secs: Option<u64>,
}

impl AppConfigBuilder {
    /// Set the backend base URL
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Set the session storage directory
    pub fn storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }

    /// Set the request timeout in seconds
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            api_url: self.api_url,
            storage_dir: self.storage_dir,
            request_timeout_secs: self.request_timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid config file: {0}")]
    Parse(String),
}
