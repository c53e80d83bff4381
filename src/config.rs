//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::endpoint::{self, Environment, RequestContext};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Stats stream endpoint configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EndpointConfig {
    /// Fixed websocket URL; takes precedence over `host`
    pub url: Option<String>,

    /// Host to derive the URL from, e.g. `rail.example.com`
    pub host: Option<String>,

    /// Use `wss://` when deriving from `host`
    #[serde(default)]
    pub secure: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("railstats").join("config.toml")),
            Some(PathBuf::from("/etc/railstats/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Some(url) = Environment::from_process().websocket_url {
            self.endpoint.url = Some(url);
        }
        if let Ok(host) = std::env::var("RAILSTATS_HOST") {
            self.endpoint.host = Some(host);
        }
        if let Ok(secure) = std::env::var("RAILSTATS_SECURE") {
            self.endpoint.secure = parse_flag(&secure);
        }

        if let Ok(level) = std::env::var("RAILSTATS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("RAILSTATS_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Resolve the websocket URL the dashboard should connect to
    pub fn endpoint_url(&self) -> String {
        let env = Environment {
            websocket_url: self.endpoint.url.clone(),
        };
        let request = self
            .endpoint
            .host
            .as_ref()
            .map(|host| RequestContext::new(host.clone(), self.endpoint.secure));

        endpoint::resolve(&env, request.as_ref())
    }
}

fn parse_flag(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    value == "1" || value == "true" || value == "yes"
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Railstats Configuration
#
# Environment variables override these settings:
# - RAILSTATS_WEBSOCKET_URL (or VITE_WEBSOCKET_URL)
# - RAILSTATS_HOST
# - RAILSTATS_SECURE
# - RAILSTATS_LOG_LEVEL
# - RAILSTATS_LOG_FORMAT

[endpoint]
# Fixed websocket URL of the stats stream
# url = "ws://localhost:8080/national"

# Host to derive the URL from when `url` is unset
# host = "rail.example.com"

# Use wss:// for the derived URL
secure = false

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
