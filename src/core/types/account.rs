//! AI provider accounts and their credentials

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// External AI provider a pooled account belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Anthropic Claude
    Claude,
    /// Google Gemini
    Gemini,
    /// OpenAI
    OpenAi,
    /// Anything else the backend knows about
    #[serde(untagged)]
    Other(String),
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Claude => f.write_str("claude"),
            Self::Gemini => f.write_str("gemini"),
            Self::OpenAi => f.write_str("openai"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// How the account authenticates against its provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthType {
    /// Linked via the OAuth flow
    Oauth,
    /// Static API key
    ApiKey,
}

/// Credential material, discriminated by auth type.
///
/// Deliberately a tagged enum rather than a flat record of optionals: an
/// account either has a key or an OAuth token pair, never a mix.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Credentials {
    /// Static API key
    ApiKey {
        /// The key value
        key: String,
    },
    /// OAuth token pair from the linking flow
    Oauth {
        /// Short-lived access token
        access_token: String,
        /// Long-lived refresh token
        refresh_token: String,
        /// Access token expiry
        #[serde(default)]
        expires_at: Option<DateTime<Utc>>,
    },
}

/// Optional outbound proxy attached to one account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProxy {
    /// Proxy URL
    pub url: String,
    /// Optional proxy username
    #[serde(default)]
    pub username: Option<String>,
    /// Optional proxy password
    #[serde(default)]
    pub password: Option<String>,
}

/// A credential set for one external AI provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAccount {
    /// Account id
    pub id: Uuid,
    /// Provider platform
    pub platform: Platform,
    /// How the account authenticates
    pub auth_type: AuthType,
    /// Backend-reported status (active, rate_limited, error, ...)
    #[serde(default)]
    pub status: Option<String>,
    /// Whether the account participates in pools
    pub is_enabled: bool,
    /// Daily usage cap in tokens, when set
    #[serde(default)]
    pub daily_limit: Option<u64>,
    /// Cost per token for budget attribution
    #[serde(default)]
    pub cost_per_token: Option<f64>,
    /// Optional outbound proxy
    #[serde(default)]
    pub proxy: Option<AccountProxy>,
}

/// Create payload for an api-key account; OAuth accounts are created by
/// the linking flow instead.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAccountInput {
    /// Provider platform
    pub platform: Platform,
    /// Credential material
    pub credentials: Credentials,
    /// Daily usage cap in tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_limit: Option<u64>,
    /// Optional outbound proxy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<AccountProxy>,
}
