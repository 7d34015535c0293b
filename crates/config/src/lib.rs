#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for lanekit
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/lanekit/config.toml)
//! - Environment variables
//! - CLI flags
//!
//! Action parameters are not configured here; they are validated against
//! each action's option schema in `lanekit-actions`.

pub mod constants;
pub mod core;

pub use crate::core::{EndpointConfig, GeneralConfig, NetworkConfig, TimeoutConfig};

use lanekit_errors::{ConfigError, Error};
use lanekit_types::{ColorChoice, OutputFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub endpoints: EndpointConfig,

    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("lanekit").join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        tracing::debug!(path = %path.display(), "loaded configuration file");

        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or a value has the wrong type.
    pub fn from_toml(contents: &str) -> Result<Self, Error> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        self.merge_vars(|name| std::env::var(name).ok())
    }

    /// Merge overrides from an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds a value that cannot be parsed.
    pub fn merge_vars<F>(&mut self, lookup: F) -> Result<(), Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        // LANEKIT_OUTPUT
        if let Some(output) = lookup("LANEKIT_OUTPUT") {
            self.general.default_output = match output.as_str() {
                "plain" => OutputFormat::Plain,
                "tty" => OutputFormat::Tty,
                "json" => OutputFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "LANEKIT_OUTPUT".to_string(),
                        value: output,
                    }
                    .into())
                }
            };
        }

        // LANEKIT_COLOR
        if let Some(color) = lookup("LANEKIT_COLOR") {
            self.general.color = match color.as_str() {
                "always" => ColorChoice::Always,
                "auto" => ColorChoice::Auto,
                "never" => ColorChoice::Never,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "LANEKIT_COLOR".to_string(),
                        value: color,
                    }
                    .into())
                }
            };
        }

        // LANEKIT_BUGLY_ENDPOINT / LANEKIT_PGYER_ENDPOINT
        if let Some(endpoint) = lookup("LANEKIT_BUGLY_ENDPOINT") {
            self.endpoints.bugly = checked_endpoint("LANEKIT_BUGLY_ENDPOINT", endpoint)?;
        }
        if let Some(endpoint) = lookup("LANEKIT_PGYER_ENDPOINT") {
            self.endpoints.pgyer = checked_endpoint("LANEKIT_PGYER_ENDPOINT", endpoint)?;
        }

        Ok(())
    }
}

fn checked_endpoint(field: &str, value: String) -> Result<String, Error> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(value.trim_end_matches('/').to_string())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults_match_service_contracts() {
        let config = Config::default();
        assert_eq!(config.endpoints.bugly, "https://api.bugly.qq.com");
        assert_eq!(config.endpoints.pgyer, "http://www.pgyer.com");
        assert_eq!(
            config.timeouts.for_action("beary_chat"),
            Some(Duration::from_secs(120))
        );
        assert_eq!(
            config.timeouts.for_action("bugly"),
            Some(Duration::from_secs(300))
        );
        assert_eq!(
            config.timeouts.for_action("pgyer"),
            Some(Duration::from_secs(120))
        );
        assert_eq!(config.timeouts.for_action("slack"), None);
    }

    #[test]
    fn test_endpoint_override_trims_slash() {
        let mut config = Config::default();
        config
            .merge_vars(|name| match name {
                "LANEKIT_PGYER_ENDPOINT" => Some("http://127.0.0.1:9000/".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.endpoints.pgyer, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_endpoint_override_rejects_non_http() {
        let mut config = Config::default();
        let err = config
            .merge_vars(|name| match name {
                "LANEKIT_BUGLY_ENDPOINT" => Some("ftp://bugly".to_string()),
                _ => None,
            })
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { .. })
        ));
    }
}
