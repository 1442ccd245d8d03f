//! OAuth account-linking flow
//!
//! Two-step authorization-code exchange used to link a provider account to
//! a carpool group: request an authorization URL plus an opaque session id,
//! then exchange the user-supplied code, correlated by that session id.
//! There is no timeout and no automatic retry; on failure the caller
//! retries manually or regenerates the URL.

use crate::client::ApiClient;
use crate::core::types::{AiAccount, Platform};
use crate::utils::error::{ConsoleError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use url::Url;
use uuid::Uuid;

/// Flow state: waiting for an authorization URL, or holding one and
/// waiting for the pasted code.
#[derive(Debug, Clone)]
pub enum FlowState {
    /// Step 1 has not completed yet
    AwaitingUrl,
    /// Step 1 done; waiting for the user-supplied code
    AwaitingCode {
        /// URL the user opens in a browser
        auth_url: String,
        /// Opaque correlation id issued by the backend
        session_id: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateAuthUrlRequest {
    platform: Platform,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateAuthUrlResponse {
    auth_url: String,
    session_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExchangeCodeRequest {
    session_id: String,
    code: String,
}

/// One in-progress linking flow for a (group, platform) pair
#[derive(Debug)]
pub struct OauthLinkFlow {
    client: Arc<ApiClient>,
    group_id: Uuid,
    platform: Platform,
    state: FlowState,
}

impl OauthLinkFlow {
    /// Start a flow in the awaiting-url state
    pub fn new(client: Arc<ApiClient>, group_id: Uuid, platform: Platform) -> Self {
        Self {
            client,
            group_id,
            platform,
            state: FlowState::AwaitingUrl,
        }
    }

    /// Current flow state
    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Whether an exchange attempt would be accepted with this input
    pub fn can_exchange(&self, input: &str) -> bool {
        matches!(self.state, FlowState::AwaitingCode { .. }) && !input.trim().is_empty()
    }

    /// Step 1: request an authorization URL and session id.
    ///
    /// Also the manual "regenerate" action: calling it from awaiting-code
    /// discards the previous session and returns to a fresh awaiting-code
    /// state with the new URL.
    pub async fn generate_auth_url(&mut self) -> Result<String> {
        let path = format!(
            "/api/groups/{}/ai-accounts/oauth/generate-auth-url",
            self.group_id
        );
        let response: GenerateAuthUrlResponse = self
            .client
            .post(
                &path,
                &GenerateAuthUrlRequest {
                    platform: self.platform.clone(),
                },
            )
            .await?;

        info!(platform = %self.platform, "Authorization URL generated");
        let auth_url = response.auth_url.clone();
        self.state = FlowState::AwaitingCode {
            auth_url: response.auth_url,
            session_id: response.session_id,
        };
        Ok(auth_url)
    }

    /// Step 2: exchange the user-supplied code for credentials.
    ///
    /// Refused without a network call unless step 1 completed and the input
    /// is non-empty. The flow stays in awaiting-code on failure so the user
    /// can paste again or regenerate the URL.
    pub async fn exchange_code(&mut self, input: &str) -> Result<AiAccount> {
        let session_id = match &self.state {
            FlowState::AwaitingUrl => {
                return Err(ConsoleError::FlowState(
                    "generate an authorization URL first".to_string(),
                ));
            }
            FlowState::AwaitingCode { session_id, .. } => session_id.clone(),
        };

        let code = extract_code(&self.platform, input)?;

        let path = format!("/api/groups/{}/ai-accounts/oauth/exchange-code", self.group_id);
        let account: AiAccount = self
            .client
            .post(&path, &ExchangeCodeRequest { session_id, code })
            .await?;

        info!(platform = %self.platform, account = %account.id, "Provider account linked");
        self.state = FlowState::AwaitingUrl;
        Ok(account)
    }
}

/// Normalize the pasted input into an authorization code.
///
/// Claude users paste the full redirect URL; the code is pulled from its
/// `code` query parameter. Other platforms hand the raw code out directly.
pub fn extract_code(platform: &Platform, input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ConsoleError::Validation(
            "authorization code is empty".to_string(),
        ));
    }

    if matches!(platform, Platform::Claude) {
        if let Ok(url) = Url::parse(input) {
            return url
                .query_pairs()
                .find(|(k, _)| k == "code")
                .map(|(_, v)| v.into_owned())
                .ok_or_else(|| {
                    ConsoleError::Validation("redirect URL has no code parameter".to_string())
                });
        }
    }

    Ok(input.to_string())
}
