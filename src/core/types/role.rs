//! Roles, permissions, and scoped grants

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role a user holds within one enterprise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnterpriseRole {
    /// Full control including tenant settings
    Owner,
    /// Administrative control over resources
    Admin,
    /// Regular participant
    Member,
    /// Read-only access
    Viewer,
}

impl EnterpriseRole {
    /// Roles allowed to perform administrative mutations
    pub const ADMINISTRATIVE: [EnterpriseRole; 2] = [EnterpriseRole::Owner, EnterpriseRole::Admin];
}

impl std::fmt::Display for EnterpriseRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
            Self::Viewer => "viewer",
        };
        f.write_str(name)
    }
}

/// Scope level a role definition applies at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleScope {
    /// Whole tenant
    Enterprise,
    /// One department subtree
    Department,
    /// One carpool group
    Group,
    /// Single user
    User,
}

/// A single (resource, action) permission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Resource the permission applies to
    pub resource: String,
    /// Action the permission allows
    pub action: String,
}

/// Named role with its permission list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDefinition {
    /// Role id
    pub id: Uuid,
    /// Role name
    pub name: String,
    /// Scope level this role applies at
    pub level: RoleScope,
    /// Permissions granted by this role
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// Binding of a role to a user at a specific scope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPermission {
    /// User the role is granted to
    pub user_id: Uuid,
    /// Granted role
    pub role_id: Uuid,
    /// Scope level of the grant
    pub scope: RoleScope,
    /// Department or group the grant is scoped to, when applicable
    #[serde(default)]
    pub scope_id: Option<Uuid>,
    /// Optional expiry
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}
