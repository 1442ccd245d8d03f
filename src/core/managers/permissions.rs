//! Permission manager
//!
//! Lists scoped role grants and mutates a user's roles. Client-side gating
//! is advisory; the backend is the authority on whether a grant sticks.

use crate::client::ApiClient;
use crate::core::context::SharedContext;
use crate::core::types::{RoleDefinition, UserPermission};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Grant payload for assigning a role to a user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleGrant {
    /// Role to grant
    pub role_id: Uuid,
    /// Department or group the grant is scoped to, when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_id: Option<Uuid>,
    /// Optional expiry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Listing returned by the permissions endpoint
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionListing {
    /// Available role definitions
    #[serde(default)]
    pub roles: Vec<RoleDefinition>,
    /// Current grants
    #[serde(default)]
    pub grants: Vec<UserPermission>,
}

/// Fetch-render-mutate unit for role grants
#[derive(Debug)]
pub struct PermissionManager {
    context: SharedContext,
    client: Arc<ApiClient>,
    snapshot: RwLock<PermissionListing>,
}

impl PermissionManager {
    /// Create a manager bound to the given context
    pub fn new(context: SharedContext) -> Self {
        let client = Arc::clone(context.directory().client());
        Self {
            context,
            client,
            snapshot: RwLock::new(PermissionListing::default()),
        }
    }

    /// Last fetched listing
    pub fn snapshot(&self) -> PermissionListing {
        self.snapshot.read().clone()
    }

    /// Fetch roles and grants for the current enterprise
    pub async fn refresh(&self) -> Result<PermissionListing> {
        let enterprise_id = self.context.require_enterprise()?;
        let listing: PermissionListing = self
            .client
            .get(&format!("/api/enterprises/{}/permissions", enterprise_id))
            .await?;
        *self.snapshot.write() = listing.clone();
        Ok(listing)
    }

    /// Grant a role to a user, then refetch
    pub async fn assign_role(&self, user_id: Uuid, grant: &RoleGrant) -> Result<PermissionListing> {
        self.context.require_admin()?;
        let enterprise_id = self.context.require_enterprise()?;
        self.client
            .post_ack(
                &format!(
                    "/api/enterprises/{}/users/{}/roles",
                    enterprise_id, user_id
                ),
                grant,
            )
            .await?;
        info!(user = %user_id, role = %grant.role_id, "Role assigned");
        self.refresh().await
    }

    /// Revoke a role from a user, then refetch
    pub async fn revoke_role(&self, user_id: Uuid, role_id: Uuid) -> Result<PermissionListing> {
        self.context.require_admin()?;
        let enterprise_id = self.context.require_enterprise()?;
        self.client
            .delete_ack(&format!(
                "/api/enterprises/{}/users/{}/roles?roleId={}",
                enterprise_id, user_id, role_id
            ))
            .await?;
        info!(user = %user_id, role = %role_id, "Role revoked");
        self.refresh().await
    }
}
