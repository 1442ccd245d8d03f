//! Dashboard composer
//!
//! Aggregates summary counts from the resource managers into the overview
//! page. Fetches run concurrently and independently; a failure in any one
//! fails the whole composition (the console then shows its single failure
//! line), and there is no cross-manager consistency guarantee.

use crate::core::context::SharedContext;
use crate::core::managers::{
    AccountPoolManager, AiAccountManager, BudgetManager, DepartmentManager, ModelHealthManager,
};
use crate::utils::error::{ConsoleError, Result};
use serde::Serialize;

/// Counts shown on the overview tab
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    /// Current enterprise name
    pub enterprise: String,
    /// Caller's role in it
    pub role: String,
    /// Member count as embedded in the membership listing
    pub members: u64,
    /// Department count
    pub departments: usize,
    /// Account pool count
    pub pools: usize,
    /// AI account count
    pub accounts: usize,
    /// Enabled AI account count
    pub enabled_accounts: usize,
    /// Unacknowledged budget alerts
    pub open_alerts: usize,
    /// Models currently failing their probes
    pub unhealthy_models: usize,
}

/// Composes the overview tab from the individual managers
#[derive(Debug)]
pub struct DashboardComposer {
    context: SharedContext,
    departments: DepartmentManager,
    pools: AccountPoolManager,
    accounts: AiAccountManager,
    budgets: BudgetManager,
    health: ModelHealthManager,
}

impl DashboardComposer {
    /// Build a composer with one manager per resource family
    pub fn new(context: SharedContext) -> Self {
        Self {
            departments: DepartmentManager::new(context.clone()),
            pools: AccountPoolManager::new(context.clone()),
            accounts: AiAccountManager::new(context.clone()),
            budgets: BudgetManager::new(context.clone()),
            health: ModelHealthManager::new(context.clone()),
            context,
        }
    }

    /// Fetch everything and fold it into the summary
    pub async fn compose(&self) -> Result<DashboardSummary> {
        let membership = self
            .context
            .current()
            .ok_or_else(|| ConsoleError::Validation("no enterprise selected".to_string()))?;

        let (departments, pools, accounts, alerts, health) = tokio::try_join!(
            self.departments.refresh(),
            self.pools.refresh(),
            self.accounts.refresh(),
            self.budgets.refresh_alerts(),
            self.health.refresh(),
        )?;

        Ok(DashboardSummary {
            enterprise: membership.enterprise.name,
            role: membership.role.to_string(),
            members: membership.counts.members,
            departments: departments.len(),
            pools: pools.len(),
            accounts: accounts.len(),
            enabled_accounts: accounts.iter().filter(|a| a.is_enabled).count(),
            open_alerts: alerts.iter().filter(|a| !a.acknowledged).count(),
            unhealthy_models: health.iter().filter(|h| !h.healthy).count(),
        })
    }
}
