//! Enterprise (tenant) and membership types

use super::role::EnterpriseRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Root tenant boundary.
///
/// Created externally; read-only from the console apart from name/plan
/// display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enterprise {
    /// Enterprise id
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Billing plan
    #[serde(default)]
    pub plan_type: Option<String>,
    /// Organization flavor (company, team, ...)
    #[serde(default)]
    pub organization_type: Option<String>,
    /// Feature flags enabled for this tenant
    #[serde(default)]
    pub feature_set: Vec<String>,
}

/// One row per (user, enterprise) pair; identifies the user's role within a
/// tenant. `last_accessed` is mutated server-side on switch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    /// User id
    pub user_id: Uuid,
    /// Enterprise id
    pub enterprise_id: Uuid,
    /// Role within this enterprise
    pub role: EnterpriseRole,
    /// When the user joined
    pub joined_at: DateTime<Utc>,
    /// Last time the user switched into this enterprise
    #[serde(default)]
    pub last_accessed: Option<DateTime<Utc>>,
    /// Whether the membership is active
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Embedded enterprise record
    pub enterprise: Enterprise,
    /// Summary counts embedded by the membership listing
    #[serde(default)]
    pub counts: MembershipCounts,
}

fn default_true() -> bool {
    true
}

/// Counts embedded in `GET /api/user/enterprises`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipCounts {
    /// Member count
    #[serde(default)]
    pub members: u64,
    /// Carpool group count
    #[serde(default)]
    pub groups: u64,
    /// AI account count
    #[serde(default)]
    pub accounts: u64,
}
