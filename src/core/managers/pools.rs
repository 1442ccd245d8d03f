//! Account pool manager

use crate::client::ApiClient;
use crate::core::context::SharedContext;
use crate::core::types::{AccountPool, AccountPoolInput};
use crate::utils::error::Result;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Fetch-render-mutate unit for account pools
#[derive(Debug)]
pub struct AccountPoolManager {
    context: SharedContext,
    client: Arc<ApiClient>,
    snapshot: RwLock<Vec<AccountPool>>,
}

impl AccountPoolManager {
    /// Create a manager bound to the given context
    pub fn new(context: SharedContext) -> Self {
        let client = Arc::clone(context.directory().client());
        Self {
            context,
            client,
            snapshot: RwLock::new(Vec::new()),
        }
    }

    /// Last fetched pool list
    pub fn snapshot(&self) -> Vec<AccountPool> {
        self.snapshot.read().clone()
    }

    /// Fetch all pools of the current enterprise
    pub async fn refresh(&self) -> Result<Vec<AccountPool>> {
        let enterprise_id = self.context.require_enterprise()?;
        let pools: Vec<AccountPool> = self
            .client
            .get(&format!("/api/enterprises/{}/account-pools", enterprise_id))
            .await?;
        *self.snapshot.write() = pools.clone();
        Ok(pools)
    }

    /// Create a pool, then refetch
    pub async fn create(&self, input: &AccountPoolInput) -> Result<Vec<AccountPool>> {
        self.context.require_admin()?;
        let enterprise_id = self.context.require_enterprise()?;
        self.client
            .post_ack(
                &format!("/api/enterprises/{}/account-pools", enterprise_id),
                input,
            )
            .await?;
        info!(name = %input.name, "Account pool created");
        self.refresh().await
    }

    /// Update a pool's policy or bindings, then refetch
    pub async fn update(&self, pool_id: Uuid, input: &AccountPoolInput) -> Result<Vec<AccountPool>> {
        self.context.require_admin()?;
        let enterprise_id = self.context.require_enterprise()?;
        self.client
            .put_ack(
                &format!(
                    "/api/enterprises/{}/account-pools/{}",
                    enterprise_id, pool_id
                ),
                input,
            )
            .await?;
        info!(pool = %pool_id, "Account pool updated");
        self.refresh().await
    }

    /// Delete a pool, then refetch
    pub async fn delete(&self, pool_id: Uuid) -> Result<Vec<AccountPool>> {
        self.context.require_admin()?;
        let enterprise_id = self.context.require_enterprise()?;
        self.client
            .delete_ack(&format!(
                "/api/enterprises/{}/account-pools/{}",
                enterprise_id, pool_id
            ))
            .await?;
        info!(pool = %pool_id, "Account pool deleted");
        self.refresh().await
    }
}
