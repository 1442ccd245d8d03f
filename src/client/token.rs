//! Process-wide session token store
//!
//! The bearer token is issued externally (sign-in is out of scope); the
//! console only carries it and reads it before every API call.

use crate::config::SessionConfig;
use crate::utils::error::{ConsoleError, Result};
use arc_swap::ArcSwapOption;
use std::sync::Arc;
use tracing::debug;

/// Lock-free holder for the current bearer token
#[derive(Debug, Default)]
pub struct TokenStore {
    token: ArcSwapOption<String>,
}

impl TokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from session configuration.
    ///
    /// An inline token wins over a token file; a missing file is an error
    /// only when it was explicitly configured.
    pub async fn from_config(config: &SessionConfig) -> Result<Self> {
        let store = Self::new();

        if let Some(token) = &config.token {
            store.set(token.clone());
        } else if let Some(path) = &config.token_file {
            let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
                ConsoleError::Config(format!("Failed to read token file {}: {}", path, e))
            })?;
            let token = raw.trim().to_string();
            if token.is_empty() {
                return Err(ConsoleError::Config(format!("Token file {} is empty", path)));
            }
            store.set(token);
        }

        Ok(store)
    }

    /// Replace the current token
    pub fn set(&self, token: String) {
        debug!("Session token updated");
        self.token.store(Some(Arc::new(token)));
    }

    /// Drop the current token
    pub fn clear(&self) {
        self.token.store(None);
    }

    /// Current token, if signed in
    pub fn get(&self) -> Option<Arc<String>> {
        self.token.load_full()
    }

    /// Current token or an auth error for callers about to hit the API
    pub fn require(&self) -> Result<Arc<String>> {
        self.get()
            .ok_or_else(|| ConsoleError::Auth("no session token configured".to_string()))
    }
}
