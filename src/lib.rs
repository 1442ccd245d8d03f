//! # Carpool Console
//!
//! Admin console for a multi-tenant pooled AI account ("carpool")
//! platform. The console is a pure client of the platform REST API: it
//! switches between enterprises, gates admin actions on the caller's role
//! within the current one, and manages departments, account pools, AI
//! accounts, budgets, permissions, and invites. All state is owned by the
//! backend; the console mirrors it for rendering and refetches after every
//! mutation.
//!
//! Role gating here is advisory UI behavior, not a security boundary; the
//! backend enforces authorization on every endpoint.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use carpool_console::Console;
//! use carpool_console::core::managers::DepartmentManager;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let console = Console::from_env().await?;
//!     let context = console.context();
//!
//!     let view = context.directory().switcher_view().await?;
//!     if let Some(membership) = view.recent.first() {
//!         context.select(membership.enterprise_id).await?;
//!     }
//!
//!     let departments = DepartmentManager::new(context.clone());
//!     for dept in departments.refresh().await? {
//!         println!("{}", dept.name);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod console;
pub mod core;
pub mod monitoring;
pub mod utils;

// Re-export main types
pub use crate::client::{ApiClient, TokenStore};
pub use crate::config::Config;
pub use crate::core::context::{role_allowed, EnterpriseContext, EnterpriseDirectory, SharedContext};
pub use crate::core::types::EnterpriseRole;
pub use crate::utils::error::{ConsoleError, Result};

use std::sync::Arc;
use tracing::info;

/// Wired-up console: configuration, API client, and enterprise context
#[derive(Debug)]
pub struct Console {
    config: Config,
    context: SharedContext,
}

impl Console {
    /// Build a console from an already loaded configuration
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating console instance");

        let tokens = Arc::new(TokenStore::from_config(config.session()).await?);
        let client = Arc::new(ApiClient::new(config.api().clone(), tokens)?);
        let directory = EnterpriseDirectory::new(client);
        let context = Arc::new(EnterpriseContext::new(directory));

        Ok(Self { config, context })
    }

    /// Build a console from a YAML configuration file
    pub async fn from_file(path: &str) -> Result<Self> {
        Self::new(Config::from_file(path).await?).await
    }

    /// Build a console from environment variables only
    pub async fn from_env() -> Result<Self> {
        Self::new(Config::from_env()?).await
    }

    /// Loaded configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared enterprise context handed to the managers
    pub fn context(&self) -> SharedContext {
        Arc::clone(&self.context)
    }
}

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
