//! Budget, cost, and alert types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Query window for cost reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    /// Current day
    Today,
    /// Trailing seven days
    Week,
    /// Trailing thirty days
    Month,
    /// Current billing quarter
    Quarter,
}

impl TimeRange {
    /// Query-string value expected by the costs endpoint
    pub fn as_query(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
        }
    }
}

/// Aggregated spend for one enterprise over a time range.
///
/// Aggregation happens in the backend cost engine; the console renders it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSummary {
    /// Total spend in cents
    pub total_cost: f64,
    /// Total tokens consumed
    #[serde(default)]
    pub total_tokens: u64,
    /// Spend broken down by platform name
    #[serde(default)]
    pub by_platform: Vec<PlatformCost>,
    /// Spend broken down by department
    #[serde(default)]
    pub by_department: Vec<DepartmentCost>,
}

/// Per-platform slice of a cost summary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformCost {
    /// Platform name
    pub platform: String,
    /// Spend in cents
    pub cost: f64,
    /// Tokens consumed
    #[serde(default)]
    pub tokens: u64,
}

/// Per-department slice of a cost summary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentCost {
    /// Department id
    pub department_id: Uuid,
    /// Department name
    pub department_name: String,
    /// Spend in cents
    pub cost: f64,
}

/// Severity reported with a budget alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    /// Informational
    Info,
    /// Approaching the budget limit
    Warning,
    /// Limit reached or exceeded
    Critical,
}

/// One alert raised by the backend alert engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlert {
    /// Alert id
    pub id: Uuid,
    /// Severity
    pub severity: AlertSeverity,
    /// Human-readable description
    pub message: String,
    /// Department the alert concerns, when scoped
    #[serde(default)]
    pub department_id: Option<Uuid>,
    /// Fraction of the budget consumed, 0.0..=1.0 and beyond when exceeded
    #[serde(default)]
    pub usage_ratio: Option<f64>,
    /// When the alert was raised
    pub created_at: DateTime<Utc>,
    /// Whether an operator acknowledged it
    #[serde(default)]
    pub acknowledged: bool,
}

/// Payload to set or change a department/enterprise budget limit
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetInput {
    /// Department to cap, `None` for the enterprise-wide budget
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<Uuid>,
    /// Budget cap in cents
    pub budget_limit: u64,
}
