//! Enterprise directory: the membership listing behind the switcher

use crate::client::ApiClient;
use crate::core::types::Membership;
use crate::utils::error::Result;
use std::sync::Arc;

/// How many entries the switcher shows under "recent"
const RECENT_LIMIT: usize = 3;

/// Client for the membership listing endpoint
#[derive(Debug, Clone)]
pub struct EnterpriseDirectory {
    client: Arc<ApiClient>,
}

/// Switcher presentation of the membership list
#[derive(Debug, Clone, Default)]
pub struct SwitcherView {
    /// Most recently accessed memberships, at most three
    pub recent: Vec<Membership>,
    /// Everything else, still in recency order
    pub other: Vec<Membership>,
}

impl EnterpriseDirectory {
    /// Create a directory over the given API client
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// API client this directory fetches through
    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// Fetch the enterprises the user belongs to
    pub async fn list_memberships(&self) -> Result<Vec<Membership>> {
        self.client.get("/api/user/enterprises").await
    }

    /// Fetch and partition the list for the switcher
    pub async fn switcher_view(&self) -> Result<SwitcherView> {
        let memberships = self.list_memberships().await?;
        Ok(partition_recent(memberships))
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        use crate::client::TokenStore;
        use crate::config::ApiConfig;

        let tokens = Arc::new(TokenStore::new());
        tokens.set("test-token".to_string());
        Self::new(Arc::new(
            ApiClient::new(ApiConfig::default(), tokens).unwrap(),
        ))
    }
}

/// Sort by `last_accessed` descending and split into recent (top 3) and
/// other. Entries that were never accessed sort last.
pub fn partition_recent(mut memberships: Vec<Membership>) -> SwitcherView {
    memberships.sort_by(|a, b| b.last_accessed.cmp(&a.last_accessed));

    let other = if memberships.len() > RECENT_LIMIT {
        memberships.split_off(RECENT_LIMIT)
    } else {
        Vec::new()
    };

    SwitcherView {
        recent: memberships,
        other,
    }
}
