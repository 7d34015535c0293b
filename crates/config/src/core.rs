//! Configuration sections

use crate::constants::{
    BEARY_CHAT_TIMEOUT_SECS, BUGLY_BASE_URL, BUGLY_TIMEOUT_SECS, CONNECT_TIMEOUT_SECS,
    PGYER_BASE_URL, PGYER_TIMEOUT_SECS,
};
use lanekit_types::{ColorChoice, OutputFormat};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// General application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    #[serde(default = "default_color_choice")]
    pub color: ColorChoice,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: OutputFormat::Tty,
            color: ColorChoice::Auto,
        }
    }
}

/// Transport settings shared by every action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64, // seconds
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            connect_timeout: CONNECT_TIMEOUT_SECS,
        }
    }
}

impl NetworkConfig {
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }
}

/// Base URLs of the services with fixed endpoints
///
/// The chat webhook is not listed: its URL is an action parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_bugly_endpoint")]
    pub bugly: String,
    #[serde(default = "default_pgyer_endpoint")]
    pub pgyer: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            bugly: default_bugly_endpoint(),
            pgyer: default_pgyer_endpoint(),
        }
    }
}

/// Per-action request deadlines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_beary_chat_timeout")]
    pub beary_chat: u64, // seconds
    #[serde(default = "default_bugly_timeout")]
    pub bugly: u64,
    #[serde(default = "default_pgyer_timeout")]
    pub pgyer: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            beary_chat: BEARY_CHAT_TIMEOUT_SECS,
            bugly: BUGLY_TIMEOUT_SECS,
            pgyer: PGYER_TIMEOUT_SECS,
        }
    }
}

impl TimeoutConfig {
    /// Deadline for the named action, if it is a known action
    #[must_use]
    pub fn for_action(&self, action: &str) -> Option<Duration> {
        let secs = match action {
            "beary_chat" => self.beary_chat,
            "bugly" => self.bugly,
            "pgyer" => self.pgyer,
            _ => return None,
        };
        Some(Duration::from_secs(secs))
    }
}

// Default value functions for serde
fn default_output_format() -> OutputFormat {
    OutputFormat::Tty
}

fn default_color_choice() -> ColorChoice {
    ColorChoice::Auto
}

fn default_user_agent() -> String {
    format!("lanekit/{}", env!("CARGO_PKG_VERSION"))
}

fn default_connect_timeout() -> u64 {
    CONNECT_TIMEOUT_SECS
}

fn default_bugly_endpoint() -> String {
    BUGLY_BASE_URL.to_string()
}

fn default_pgyer_endpoint() -> String {
    PGYER_BASE_URL.to_string()
}

fn default_beary_chat_timeout() -> u64 {
    BEARY_CHAT_TIMEOUT_SECS
}

fn default_bugly_timeout() -> u64 {
    BUGLY_TIMEOUT_SECS
}

fn default_pgyer_timeout() -> u64 {
    PGYER_TIMEOUT_SECS
}
