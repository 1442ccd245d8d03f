//! Shared helpers for the integration tests

use carpool_console::client::{ApiClient, TokenStore};
use carpool_console::config::ApiConfig;
use carpool_console::core::context::{EnterpriseContext, EnterpriseDirectory};
use carpool_console::SharedContext;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;
use wiremock::MockServer;

/// Build a context whose API client points at the mock server
pub fn context_for(server: &MockServer) -> SharedContext {
    let tokens = Arc::new(TokenStore::new());
    tokens.set("test-token".to_string());

    let api = ApiConfig {
        base_url: server.uri(),
        ..ApiConfig::default()
    };
    let client = Arc::new(ApiClient::new(api, tokens).expect("client"));
    Arc::new(EnterpriseContext::new(EnterpriseDirectory::new(client)))
}

/// Wrap a payload in the standard success envelope
pub fn envelope(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

/// Membership record as returned by `GET /api/user/enterprises`
pub fn membership_json(enterprise_id: Uuid, name: &str, role: &str, last_accessed: Option<&str>) -> Value {
    json!({
        "userId": Uuid::new_v4(),
        "enterpriseId": enterprise_id,
        "role": role,
        "joinedAt": "2026-01-05T09:00:00Z",
        "lastAccessed": last_accessed,
        "isActive": true,
        "enterprise": {
            "id": enterprise_id,
            "name": name,
            "planType": "team",
        },
        "counts": { "members": 5, "groups": 2, "accounts": 3 }
    })
}

/// Department record in wire shape
pub fn department_json(id: Uuid, name: &str, parent_id: Option<Uuid>) -> Value {
    json!({
        "id": id,
        "name": name,
        "parentId": parent_id,
    })
}
