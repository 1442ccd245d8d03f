//! Account pools and their load-balancing policy

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a pool is shared across groups or dedicated to one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolType {
    /// Shared across carpool groups
    Shared,
    /// Dedicated to a single group
    Dedicated,
}

/// Load-balancing strategy applied by the backend balancer.
///
/// The balancer itself is external; the console only configures it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadBalanceStrategy {
    /// Rotate across accounts in order
    RoundRobin,
    /// Prefer the account with the fewest active sessions
    LeastConnections,
    /// Distribute by per-binding weight
    Weighted,
}

/// Many-to-many join of a pool and an AI account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBinding {
    /// Bound account
    pub account_id: Uuid,
    /// Weight used by the weighted strategy
    #[serde(default)]
    pub weight: Option<u32>,
    /// Cap on the share of pool load this account may take
    #[serde(default)]
    pub max_load_percentage: Option<u8>,
}

/// Many-to-many join of a pool and a carpool group
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupBinding {
    /// Bound group
    pub group_id: Uuid,
    /// Weight used by the weighted strategy
    #[serde(default)]
    pub weight: Option<u32>,
}

/// A named collection of AI accounts behind one balancing policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPool {
    /// Pool id
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Shared or dedicated
    pub pool_type: PoolType,
    /// Balancing strategy
    pub load_balance_strategy: LoadBalanceStrategy,
    /// Per-account concurrent load ceiling
    #[serde(default)]
    pub max_load_per_account: Option<u32>,
    /// Selection priority among pools
    #[serde(default)]
    pub priority: Option<i32>,
    /// Bound accounts
    #[serde(default)]
    pub account_bindings: Vec<AccountBinding>,
    /// Bound groups
    #[serde(default)]
    pub group_bindings: Vec<GroupBinding>,
}

/// Create/update payload for a pool
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPoolInput {
    /// Display name
    pub name: String,
    /// Shared or dedicated
    pub pool_type: PoolType,
    /// Balancing strategy
    pub load_balance_strategy: LoadBalanceStrategy,
    /// Per-account concurrent load ceiling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_load_per_account: Option<u32>,
    /// Selection priority among pools
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// Bound accounts
    #[serde(default)]
    pub account_bindings: Vec<AccountBinding>,
    /// Bound groups
    #[serde(default)]
    pub group_bindings: Vec<GroupBinding>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_wire_format() {
        assert_eq!(
            serde_json::to_string(&LoadBalanceStrategy::LeastConnections).unwrap(),
            "\"least_connections\""
        );
        let s: LoadBalanceStrategy = serde_json::from_str("\"round_robin\"").unwrap();
        assert_eq!(s, LoadBalanceStrategy::RoundRobin);
    }
}
