//! core::config
//!
//! Configuration schema and loading.
//!
//! # Locations
//!
//! The global config file is searched in order:
//! 1. `$MODELEX_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/modelex/config.toml`
//! 3. `~/.modelex/config.toml` (canonical write location)
//!
//! A missing file yields the default (empty) configuration.
//!
//! # Token precedence
//!
//! The `MODELEX_TOKEN` environment variable overrides the config-file token.

pub mod schema;

pub use schema::{GlobalConfig, RemoteConfig};

use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file path.
const CONFIG_PATH_ENV: &str = "MODELEX_CONFIG";

/// Environment variable overriding the config-file token.
const TOKEN_ENV: &str = "MODELEX_TOKEN";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration with precedence applied.
#[derive(Debug, Clone, Default)]
pub struct Config {
    global: GlobalConfig,
}

impl Config {
    /// Load the global configuration.
    ///
    /// Returns the default configuration when no file exists at any of the
    /// searched locations.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a file exists but cannot be read, parsed,
    /// or validated.
    pub fn load() -> Result<Self, ConfigError> {
        match global_config_path() {
            Some(path) if path.exists() => {
                let text = fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
                    path: path.clone(),
                    source,
                })?;
                let global: GlobalConfig =
                    toml::from_str(&text).map_err(|err| ConfigError::ParseError {
                        path: path.clone(),
                        message: err.to_string(),
                    })?;
                global.validate()?;
                Ok(Self { global })
            }
            _ => Ok(Self::default()),
        }
    }

    /// Build a configuration directly from a schema value (used in tests).
    pub fn from_global(global: GlobalConfig) -> Self {
        Self { global }
    }

    /// The remote base URL, if configured.
    pub fn base_url(&self) -> Option<&str> {
        self.global
            .remote
            .as_ref()
            .and_then(|remote| remote.base_url.as_deref())
    }

    /// The access token, with `MODELEX_TOKEN` taking precedence.
    pub fn token(&self) -> Option<String> {
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.is_empty() {
                return Some(token);
            }
        }
        self.global
            .remote
            .as_ref()
            .and_then(|remote| remote.token.clone())
    }
}

/// Resolve the global config file path.
fn global_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        let xdg = config_dir.join("modelex").join("config.toml");
        if xdg.exists() {
            return Some(xdg);
        }
    }
    dirs::home_dir().map(|home| home.join(".modelex").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_remote() {
        let config = Config::default();
        assert!(config.base_url().is_none());
    }

    #[test]
    fn accessors_read_schema_values() {
        let global: GlobalConfig = toml::from_str(
            r#"
            [remote]
            base_url = "https://models.example.com"
            token = "mex_abc"
            "#,
        )
        .unwrap();
        let config = Config::from_global(global);
        assert_eq!(config.base_url(), Some("https://models.example.com"));
        // Env override is exercised in integration tests; the file token is
        // the fallback.
        if std::env::var(TOKEN_ENV).is_err() {
            assert_eq!(config.token().as_deref(), Some("mex_abc"));
        }
    }
}
