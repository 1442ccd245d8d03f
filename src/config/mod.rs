//! Configuration management for the console
//!
//! This module handles loading, validation, and management of all console
//! configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{ConsoleError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the console
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Console configuration
    pub console: ConsoleConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConsoleError::Config(format!("Failed to read config file: {}", e)))?;

        let console: ConsoleConfig = serde_yaml::from_str(&content)
            .map_err(|e| ConsoleError::Config(format!("Failed to parse config: {}", e)))?;

        let mut config = Self { console };
        config.console.apply_env_overrides();
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut console = ConsoleConfig::default();
        console.apply_env_overrides();

        let config = Self { console };
        config.validate()?;
        Ok(config)
    }

    /// Get API configuration
    pub fn api(&self) -> &ApiConfig {
        &self.console.api
    }

    /// Get session configuration
    pub fn session(&self) -> &SessionConfig {
        &self.console.session
    }

    /// Get polling configuration
    pub fn polling(&self) -> &PollingConfig {
        &self.console.polling
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        self.console.validate()
    }
}
