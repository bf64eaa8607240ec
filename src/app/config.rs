use std::path::PathBuf;
use std::time::Duration;

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};

/// Default backend URL
const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Environment variable overriding the backend URL
pub const API_URL_ENV: &str = "KOBUN_API_URL";

const APP_DIR: &str = "kobun-vocab";
const CONFIG_FILE: &str = "config.toml";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration wrapper.
#[derive(Debug, Clone)]
pub struct Config {
    app: AppConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_app(AppConfig::default()).with_env_override()
    }
}

impl Config {
    /// Create a new configuration with default values and the env override
    pub fn new() -> Self {
        Self::default()
    }

    /// Config file, then `KOBUN_API_URL`, then built-in defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let file = match Self::config_path() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))?;
                tracing::debug!("[CONFIG] Loaded {}", path.display());
                AppConfig::from_toml_str(&contents)?
            }
            _ => AppConfig::default(),
        };
        let env = match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => AppConfig::builder().api_url(url.trim()).build()?,
            _ => AppConfig::default(),
        };
        Ok(Self::from_app(file.merge(env)))
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        Ok(Self::from_app(builder.build()?))
    }

    /// Replace the backend URL, validating it like the config file value.
    pub fn with_api_url(self, url: &str) -> Result<Self, ConfigError> {
        let overlay = AppConfig::builder().api_url(url.trim()).build()?;
        Ok(Self::from_app(self.app.merge(overlay)))
    }

    fn from_app(app: AppConfig) -> Self {
        Self { app }
    }

    fn with_env_override(self) -> Self {
        let Ok(url) = std::env::var(API_URL_ENV) else {
            return self;
        };
        match AppConfig::builder().api_url(url.trim()).build() {
            Ok(env) => Self::from_app(self.app.merge(env)),
            Err(e) => {
                tracing::warn!("[CONFIG] Ignoring {}: {}", API_URL_ENV, e);
                self
            }
        }
    }

    /// Location of the optional TOML config file
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        let base = self.base_url().trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    pub fn base_url(&self) -> &str {
        self.app.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Directory that holds the persisted session
    pub fn storage_dir(&self) -> PathBuf {
        self.app.storage_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(APP_DIR)
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.app.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}
