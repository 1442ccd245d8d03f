//! Invite manager
//!
//! Batch invites validate entirely client-side before any network call:
//! oversized lists are rejected outright and malformed addresses are
//! filtered out. The batch endpoint reports per-item outcomes; those are
//! counted into a single summary, the only partial-failure surface in the
//! console.

use crate::client::ApiClient;
use crate::core::context::SharedContext;
use crate::core::types::{EnterpriseRole, InviteLink, InviteOutcome, InviteReport, InviteRequest};
use crate::utils::error::{ConsoleError, Result};
use crate::utils::validate::filter_emails;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// Largest batch the console will submit
pub const MAX_BATCH_INVITES: usize = 50;

/// Fetch-render-mutate unit for invitations
#[derive(Debug)]
pub struct InviteManager {
    context: SharedContext,
    client: Arc<ApiClient>,
}

impl InviteManager {
    /// Create a manager bound to the given context
    pub fn new(context: SharedContext) -> Self {
        let client = Arc::clone(context.directory().client());
        Self { context, client }
    }

    /// Validate a raw address list without touching the network.
    ///
    /// Errors when the list is empty, everything was malformed, or more
    /// than [`MAX_BATCH_INVITES`] entries were supplied.
    pub fn prepare_batch(raw: &[&str]) -> Result<(Vec<String>, Vec<String>)> {
        if raw.len() > MAX_BATCH_INVITES {
            return Err(ConsoleError::Validation(format!(
                "at most {} invites per batch, got {}",
                MAX_BATCH_INVITES,
                raw.len()
            )));
        }

        let (valid, dropped) = filter_emails(raw.iter().copied());
        if valid.is_empty() {
            return Err(ConsoleError::Validation(
                "no valid email addresses in the list".to_string(),
            ));
        }
        Ok((valid, dropped))
    }

    /// Submit a batch invite with the given role for all invitees
    pub async fn batch_invite(&self, raw: &[&str], role: EnterpriseRole) -> Result<InviteReport> {
        self.context.require_admin()?;
        let enterprise_id = self.context.require_enterprise()?;

        let (emails, dropped) = Self::prepare_batch(raw)?;
        if !dropped.is_empty() {
            warn!(count = dropped.len(), "Dropped malformed addresses");
        }

        let outcomes: Vec<InviteOutcome> = self
            .client
            .post(
                &format!("/api/enterprises/{}/invites", enterprise_id),
                &InviteRequest { emails, role },
            )
            .await?;

        let report = summarize(outcomes, dropped);
        info!(
            succeeded = report.succeeded,
            failed = report.failed,
            "Batch invite finished"
        );
        Ok(report)
    }

    /// Create a shareable invite link
    pub async fn create_invite_link(&self, max_uses: Option<u32>) -> Result<InviteLink> {
        self.context.require_admin()?;
        let enterprise_id = self.context.require_enterprise()?;
        self.client
            .post(
                &format!("/api/enterprises/{}/invite-links", enterprise_id),
                &json!({ "maxUses": max_uses }),
            )
            .await
    }
}

/// Fold per-item outcomes into the final summary
fn summarize(outcomes: Vec<InviteOutcome>, dropped: Vec<String>) -> InviteReport {
    let succeeded = outcomes.iter().filter(|o| o.success).count() as u32;
    let failed = outcomes.len() as u32 - succeeded;
    InviteReport {
        succeeded,
        failed,
        dropped,
        outcomes,
    }
}
