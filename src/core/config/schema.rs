//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Config values are validated after parsing to ensure they conform to
//! expected formats (e.g., the remote base URL must be http(s)).

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// [remote]
/// base_url = "https://models.example.com"
/// token = "mex_xxx"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Remote tree-source settings
    pub remote: Option<RemoteConfig>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(remote) = &self.remote {
            remote.validate()?;
        }
        Ok(())
    }
}

/// Remote tree-source settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteConfig {
    /// Base URL of the tree-hosting service API
    pub base_url: Option<String>,

    /// Access token; `MODELEX_TOKEN` takes precedence when set
    pub token: Option<String>,
}

impl RemoteConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidValue(format!(
                    "remote.base_url must start with http:// or https://, got '{}'",
                    url
                )));
            }
        }
        Ok(())
    }
}
