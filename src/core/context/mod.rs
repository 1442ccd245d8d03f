//! Enterprise context: the current tenant and its role gate
//!
//! The context is an explicit dependency handed to every manager, not
//! ambient global state. Role checks here are advisory UI gating; the
//! backend performs the authoritative enforcement.

pub mod directory;

pub use directory::{EnterpriseDirectory, SwitcherView};

use crate::core::types::{EnterpriseRole, Membership};
use crate::utils::error::{ConsoleError, Result};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Pure role check shared by the context and the tests.
///
/// True iff `role` is one of `required`.
pub fn role_allowed(role: EnterpriseRole, required: &[EnterpriseRole]) -> bool {
    required.contains(&role)
}

/// Holds the current enterprise membership and exposes the role predicate
/// consumed by every admin-gated operation.
#[derive(Debug)]
pub struct EnterpriseContext {
    directory: EnterpriseDirectory,
    current: RwLock<Option<Membership>>,
}

impl EnterpriseContext {
    /// Create a context with no enterprise selected yet
    pub fn new(directory: EnterpriseDirectory) -> Self {
        Self {
            directory,
            current: RwLock::new(None),
        }
    }

    /// Directory this context switches through
    pub fn directory(&self) -> &EnterpriseDirectory {
        &self.directory
    }

    /// Current membership, if one is selected
    pub fn current(&self) -> Option<Membership> {
        self.current.read().clone()
    }

    /// Id of the current enterprise, if one is selected
    pub fn current_enterprise_id(&self) -> Option<Uuid> {
        self.current.read().as_ref().map(|m| m.enterprise_id)
    }

    /// Current enterprise id or an error for operations that need one
    pub fn require_enterprise(&self) -> Result<Uuid> {
        self.current_enterprise_id()
            .ok_or_else(|| ConsoleError::Validation("no enterprise selected".to_string()))
    }

    /// Whether the user's role in the current enterprise is one of `roles`.
    ///
    /// False when no enterprise is selected.
    pub fn has_role(&self, roles: &[EnterpriseRole]) -> bool {
        self.current
            .read()
            .as_ref()
            .map(|m| role_allowed(m.role, roles))
            .unwrap_or(false)
    }

    /// Fail unless the current role is administrative (owner or admin)
    pub fn require_admin(&self) -> Result<()> {
        if self.has_role(&EnterpriseRole::ADMINISTRATIVE) {
            return Ok(());
        }
        Err(ConsoleError::Authorization(
            "owner or admin role required".to_string(),
        ))
    }

    /// Switch to the enterprise with the given id.
    ///
    /// Fetches the membership list and replaces the current membership on
    /// success. On any failure the current membership is left unchanged and
    /// the error is returned; no retry is attempted. The backend updates
    /// `lastAccessed` as a side effect of the fetch.
    pub async fn switch_enterprise(&self, enterprise_id: Uuid) -> Result<Membership> {
        let memberships = self.directory.list_memberships().await?;
        let membership = memberships
            .into_iter()
            .find(|m| m.enterprise_id == enterprise_id)
            .ok_or_else(|| {
                ConsoleError::NotFound(format!("no membership for enterprise {}", enterprise_id))
            })?;

        info!(
            enterprise = %membership.enterprise.name,
            role = %membership.role,
            "Switched enterprise"
        );
        *self.current.write() = Some(membership.clone());
        Ok(membership)
    }

    /// Switcher selection with the idempotence guard: selecting the
    /// already-current enterprise issues no network call.
    pub async fn select(&self, enterprise_id: Uuid) -> Result<Option<Membership>> {
        if self.current_enterprise_id() == Some(enterprise_id) {
            return Ok(None);
        }
        self.switch_enterprise(enterprise_id).await.map(Some)
    }

    /// Directly seed the current membership.
    ///
    /// Used after an initial listing already fetched the membership; also
    /// handy in tests.
    pub fn set_current(&self, membership: Membership) {
        *self.current.write() = Some(membership);
    }
}

/// Shared handle used by the managers
pub type SharedContext = Arc<EnterpriseContext>;

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::types::{Enterprise, MembershipCounts};
    use chrono::Utc;

    pub(crate) fn membership(role: EnterpriseRole) -> Membership {
        Membership {
            user_id: Uuid::new_v4(),
            enterprise_id: Uuid::new_v4(),
            role,
            joined_at: Utc::now(),
            last_accessed: None,
            is_active: true,
            enterprise: Enterprise {
                id: Uuid::new_v4(),
                name: "acme".to_string(),
                plan_type: None,
                organization_type: None,
                feature_set: Vec::new(),
            },
            counts: MembershipCounts::default(),
        }
    }

    #[test]
    fn test_role_allowed() {
        use EnterpriseRole::*;
        assert!(!role_allowed(Member, &[Admin]));
        assert!(role_allowed(Admin, &[Owner, Admin]));
        assert!(role_allowed(Owner, &[Owner, Admin]));
        assert!(!role_allowed(Viewer, &[Owner, Admin]));
    }

    #[test]
    fn test_has_role_without_selection_is_false() {
        let context = EnterpriseContext::new(EnterpriseDirectory::for_tests());
        assert!(!context.has_role(&[EnterpriseRole::Owner]));
        assert!(context.require_admin().is_err());
    }

    #[test]
    fn test_admin_gate_by_role() {
        let context = EnterpriseContext::new(EnterpriseDirectory::for_tests());

        context.set_current(membership(EnterpriseRole::Member));
        assert!(!context.has_role(&EnterpriseRole::ADMINISTRATIVE));
        assert!(context.require_admin().is_err());

        context.set_current(membership(EnterpriseRole::Owner));
        assert!(context.has_role(&EnterpriseRole::ADMINISTRATIVE));
        assert!(context.require_admin().is_ok());
    }
}
