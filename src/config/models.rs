//! Configuration data models
//!
//! This module defines all configuration structures used throughout the
//! console.

use serde::{Deserialize, Serialize};
use std::env;
use tracing::debug;

/// Default API request timeout in seconds
pub fn default_request_timeout() -> u64 {
    30
}

/// Default API connect timeout in seconds
pub fn default_connect_timeout() -> u64 {
    10
}

/// Default poller interval in seconds
pub fn default_poll_interval() -> u64 {
    30
}

/// Top-level console configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Platform API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Session token settings
    #[serde(default)]
    pub session: SessionConfig,
    /// Background polling settings
    #[serde(default)]
    pub polling: PollingConfig,
}

/// Platform API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the platform REST API
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    /// Optional outbound proxy URL
    #[serde(default)]
    pub proxy_url: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
            proxy_url: None,
        }
    }
}

/// Session token settings
///
/// The token is issued externally; the console only carries it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Bearer token value
    #[serde(default)]
    pub token: Option<String>,
    /// File to read the bearer token from when `token` is unset
    #[serde(default)]
    pub token_file: Option<String>,
}

/// Background polling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Budget-alert refresh interval in seconds
    #[serde(default = "default_poll_interval")]
    pub alert_interval_secs: u64,
    /// Model-health refresh interval in seconds
    #[serde(default = "default_poll_interval")]
    pub health_interval_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            alert_interval_secs: default_poll_interval(),
            health_interval_secs: default_poll_interval(),
        }
    }
}

impl ConsoleConfig {
    /// Apply environment variable overrides on top of the loaded values
    pub fn apply_env_overrides(&mut self) {
        debug!("Applying environment overrides");

        if let Ok(base_url) = env::var("CONSOLE_API_BASE_URL") {
            self.api.base_url = base_url;
        }
        if let Ok(timeout) = env::var("CONSOLE_REQUEST_TIMEOUT") {
            if let Ok(timeout) = timeout.parse() {
                self.api.request_timeout = timeout;
            }
        }
        if let Ok(proxy) = env::var("CONSOLE_PROXY_URL") {
            self.api.proxy_url = Some(proxy);
        }
        if let Ok(token) = env::var("CONSOLE_TOKEN") {
            self.session.token = Some(token);
        }
        if let Ok(token_file) = env::var("CONSOLE_TOKEN_FILE") {
            self.session.token_file = Some(token_file);
        }
    }
}
