//! Model health as reported by the platform

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health snapshot for one provider model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelHealth {
    /// Platform name
    pub platform: String,
    /// Model identifier
    pub model: String,
    /// Whether the model answered its last probe
    pub healthy: bool,
    /// Probe latency
    #[serde(default)]
    pub latency_ms: Option<u64>,
    /// Error from the last failed probe
    #[serde(default)]
    pub error: Option<String>,
    /// When the backend last probed the model
    pub checked_at: DateTime<Utc>,
}
