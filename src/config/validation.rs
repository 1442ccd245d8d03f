//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.

use super::models::{ApiConfig, ConsoleConfig, PollingConfig, SessionConfig};
use crate::utils::error::{ConsoleError, Result};
use url::Url;

/// Validation trait for configuration sections
pub trait Validate {
    /// Validate this section, returning the first problem found
    fn validate(&self) -> Result<()>;
}

impl Validate for ConsoleConfig {
    fn validate(&self) -> Result<()> {
        self.api.validate()?;
        self.session.validate()?;
        self.polling.validate()?;
        Ok(())
    }
}

impl Validate for ApiConfig {
    fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ConsoleError::Config(format!("api.base_url is not a valid URL: {}", e)))?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ConsoleError::Config(format!(
                    "api.base_url must use http:// or https://, got: {}",
                    scheme
                )));
            }
        }

        if self.request_timeout == 0 {
            return Err(ConsoleError::Config(
                "api.request_timeout must be greater than zero".to_string(),
            ));
        }
        if self.connect_timeout == 0 {
            return Err(ConsoleError::Config(
                "api.connect_timeout must be greater than zero".to_string(),
            ));
        }

        if let Some(proxy) = &self.proxy_url {
            Url::parse(proxy).map_err(|e| {
                ConsoleError::Config(format!("api.proxy_url is not a valid URL: {}", e))
            })?;
        }

        Ok(())
    }
}

impl Validate for SessionConfig {
    fn validate(&self) -> Result<()> {
        if let Some(token) = &self.token {
            if token.trim().is_empty() {
                return Err(ConsoleError::Config(
                    "session.token must not be blank when set".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Validate for PollingConfig {
    fn validate(&self) -> Result<()> {
        if self.alert_interval_secs == 0 || self.health_interval_secs == 0 {
            return Err(ConsoleError::Config(
                "polling intervals must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
