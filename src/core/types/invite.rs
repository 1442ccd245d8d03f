//! Invitation types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Batch invite request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteRequest {
    /// Addresses to invite, already validated client-side
    pub emails: Vec<String>,
    /// Role the invitees will receive on acceptance
    pub role: super::EnterpriseRole,
}

/// Per-item outcome returned by the batch invite endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteOutcome {
    /// Invited address
    pub email: String,
    /// Whether the invite was created
    pub success: bool,
    /// Failure reason when not created
    #[serde(default)]
    pub error: Option<String>,
}

/// Final summary of a batch invite
#[derive(Debug, Clone, Default)]
pub struct InviteReport {
    /// Invites the backend created
    pub succeeded: u32,
    /// Invites the backend rejected
    pub failed: u32,
    /// Addresses dropped client-side as malformed
    pub dropped: Vec<String>,
    /// Per-item outcomes as returned
    pub outcomes: Vec<InviteOutcome>,
}

/// Shareable invite link
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteLink {
    /// Join URL
    pub url: String,
    /// Expiry, when limited
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Remaining uses, when limited
    #[serde(default)]
    pub remaining_uses: Option<u32>,
}
