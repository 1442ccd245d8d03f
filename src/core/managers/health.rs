//! Model health manager
//!
//! The backend probes provider models; the console fetches the snapshots
//! and keeps the latest one per (platform, model) for the dashboard and
//! the health poller.

use crate::client::ApiClient;
use crate::core::context::SharedContext;
use crate::core::types::ModelHealth;
use crate::utils::error::Result;
use dashmap::DashMap;
use std::sync::Arc;

/// Fetch unit for model health
#[derive(Debug)]
pub struct ModelHealthManager {
    context: SharedContext,
    client: Arc<ApiClient>,
    cache: DashMap<String, ModelHealth>,
}

impl ModelHealthManager {
    /// Create a manager bound to the given context
    pub fn new(context: SharedContext) -> Self {
        let client = Arc::clone(context.directory().client());
        Self {
            context,
            client,
            cache: DashMap::new(),
        }
    }

    /// Fetch current model health and refresh the cache
    pub async fn refresh(&self) -> Result<Vec<ModelHealth>> {
        let enterprise_id = self.context.require_enterprise()?;
        let entries: Vec<ModelHealth> = self
            .client
            .get(&format!("/api/enterprises/{}/model-health", enterprise_id))
            .await?;

        for entry in &entries {
            self.cache.insert(cache_key(entry), entry.clone());
        }
        Ok(entries)
    }

    /// Latest cached snapshot, unordered
    pub fn snapshot(&self) -> Vec<ModelHealth> {
        self.cache.iter().map(|e| e.value().clone()).collect()
    }

    /// Number of cached models currently unhealthy
    pub fn unhealthy_count(&self) -> usize {
        self.cache.iter().filter(|e| !e.value().healthy).count()
    }
}

fn cache_key(entry: &ModelHealth) -> String {
    format!("{}/{}", entry.platform, entry.model)
}
