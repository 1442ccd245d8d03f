//! Budget and cost manager
//!
//! Cost aggregation and alert evaluation both live in the backend; this
//! manager fetches their results and holds the alert snapshot the poller
//! refreshes.

use crate::client::ApiClient;
use crate::core::context::SharedContext;
use crate::core::types::{BudgetAlert, BudgetInput, CostSummary, TimeRange};
use crate::utils::error::Result;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

/// Fetch unit for costs, budget limits, and budget alerts
#[derive(Debug)]
pub struct BudgetManager {
    context: SharedContext,
    client: Arc<ApiClient>,
    alerts: RwLock<Vec<BudgetAlert>>,
}

impl BudgetManager {
    /// Create a manager bound to the given context
    pub fn new(context: SharedContext) -> Self {
        let client = Arc::clone(context.directory().client());
        Self {
            context,
            client,
            alerts: RwLock::new(Vec::new()),
        }
    }

    /// Fetch aggregated spend for the given window
    pub async fn costs(&self, range: TimeRange) -> Result<CostSummary> {
        let enterprise_id = self.context.require_enterprise()?;
        self.client
            .get(&format!(
                "/api/enterprises/{}/costs?timeRange={}",
                enterprise_id,
                range.as_query()
            ))
            .await
    }

    /// Fetch current budget alerts and refresh the snapshot
    pub async fn refresh_alerts(&self) -> Result<Vec<BudgetAlert>> {
        let enterprise_id = self.context.require_enterprise()?;
        let alerts: Vec<BudgetAlert> = self
            .client
            .get(&format!("/api/enterprises/{}/budget-alerts", enterprise_id))
            .await?;
        *self.alerts.write() = alerts.clone();
        Ok(alerts)
    }

    /// Last fetched alerts
    pub fn alerts(&self) -> Vec<BudgetAlert> {
        self.alerts.read().clone()
    }

    /// Count of unacknowledged alerts in the snapshot
    pub fn open_alert_count(&self) -> usize {
        self.alerts.read().iter().filter(|a| !a.acknowledged).count()
    }

    /// Set a budget limit (the gated "set budget" action)
    pub async fn set_budget(&self, input: &BudgetInput) -> Result<()> {
        self.context.require_admin()?;
        let enterprise_id = self.context.require_enterprise()?;
        self.client
            .put_ack(
                &format!("/api/enterprises/{}/budget", enterprise_id),
                input,
            )
            .await?;
        info!(limit = input.budget_limit, "Budget limit set");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::{EnterpriseContext, EnterpriseDirectory};
    use crate::core::types::EnterpriseRole;
    use crate::utils::error::ConsoleError;

    fn manager_with_role(role: EnterpriseRole) -> BudgetManager {
        let context = Arc::new(EnterpriseContext::new(EnterpriseDirectory::for_tests()));
        context.set_current(crate::core::context::tests::membership(role));
        BudgetManager::new(context)
    }

    #[tokio::test]
    async fn test_member_cannot_set_budget() {
        let manager = manager_with_role(EnterpriseRole::Member);
        let input = BudgetInput {
            department_id: None,
            budget_limit: 100_000,
        };
        let err = manager.set_budget(&input).await.unwrap_err();
        assert!(matches!(err, ConsoleError::Authorization(_)));
    }

    #[test]
    fn test_open_alert_count_ignores_acknowledged() {
        use crate::core::types::AlertSeverity;
        use chrono::Utc;
        use uuid::Uuid;

        let manager = manager_with_role(EnterpriseRole::Owner);
        let alert = |acknowledged| BudgetAlert {
            id: Uuid::new_v4(),
            severity: AlertSeverity::Warning,
            message: "80% of budget used".to_string(),
            department_id: None,
            usage_ratio: Some(0.8),
            created_at: Utc::now(),
            acknowledged,
        };
        *manager.alerts.write() = vec![alert(false), alert(true), alert(false)];
        assert_eq!(manager.open_alert_count(), 2);
    }
}
