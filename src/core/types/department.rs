//! Department tree node

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One node of the enterprise department tree.
///
/// `parent_id` must not create a cycle; the console enforces this by
/// excluding a department and its descendants from its own
/// parent-candidate list (see `DepartmentManager::parent_candidates`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    /// Department id
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Parent department, `None` for roots
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    /// Monthly budget cap in cents, when set
    #[serde(default)]
    pub budget_limit: Option<u64>,
}

/// Create/update payload for a department
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentInput {
    /// Display name
    pub name: String,
    /// Parent department
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    /// Monthly budget cap in cents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_limit: Option<u64>,
}
