//! AI account manager
//!
//! Accounts are created from an api-key form here or by the OAuth linking
//! flow (`core::oauth`); deletion is rejected by the backend while the
//! account is still bound to any pool or group, and that error is simply
//! surfaced.

use crate::client::ApiClient;
use crate::core::context::SharedContext;
use crate::core::types::{AiAccount, AiAccountInput};
use crate::utils::error::Result;
use parking_lot::RwLock;
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Fetch-render-mutate unit for AI accounts
#[derive(Debug)]
pub struct AiAccountManager {
    context: SharedContext,
    client: Arc<ApiClient>,
    snapshot: RwLock<Vec<AiAccount>>,
}

impl AiAccountManager {
    /// Create a manager bound to the given context
    pub fn new(context: SharedContext) -> Self {
        let client = Arc::clone(context.directory().client());
        Self {
            context,
            client,
            snapshot: RwLock::new(Vec::new()),
        }
    }

    /// Last fetched account list
    pub fn snapshot(&self) -> Vec<AiAccount> {
        self.snapshot.read().clone()
    }

    /// Fetch all accounts of the current enterprise
    pub async fn refresh(&self) -> Result<Vec<AiAccount>> {
        let enterprise_id = self.context.require_enterprise()?;
        let accounts: Vec<AiAccount> = self
            .client
            .get(&format!("/api/enterprises/{}/ai-accounts", enterprise_id))
            .await?;
        *self.snapshot.write() = accounts.clone();
        Ok(accounts)
    }

    /// Create an api-key account, then refetch
    pub async fn create(&self, input: &AiAccountInput) -> Result<Vec<AiAccount>> {
        self.context.require_admin()?;
        let enterprise_id = self.context.require_enterprise()?;
        self.client
            .post_ack(
                &format!("/api/enterprises/{}/ai-accounts", enterprise_id),
                input,
            )
            .await?;
        info!(platform = %input.platform, "AI account created");
        self.refresh().await
    }

    /// Enable or disable an account, then refetch
    pub async fn set_enabled(&self, account_id: Uuid, enabled: bool) -> Result<Vec<AiAccount>> {
        self.context.require_admin()?;
        let enterprise_id = self.context.require_enterprise()?;
        self.client
            .put_ack(
                &format!(
                    "/api/enterprises/{}/ai-accounts/{}",
                    enterprise_id, account_id
                ),
                &json!({ "isEnabled": enabled }),
            )
            .await?;
        info!(account = %account_id, enabled, "AI account toggled");
        self.refresh().await
    }

    /// Delete an account, then refetch.
    ///
    /// The backend refuses while the account is bound to pools or groups.
    pub async fn delete(&self, account_id: Uuid) -> Result<Vec<AiAccount>> {
        self.context.require_admin()?;
        let enterprise_id = self.context.require_enterprise()?;
        self.client
            .delete_ack(&format!(
                "/api/enterprises/{}/ai-accounts/{}",
                enterprise_id, account_id
            ))
            .await?;
        info!(account = %account_id, "AI account deleted");
        self.refresh().await
    }
}
