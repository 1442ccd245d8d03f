//! OAuth linking flow contract tests

use crate::common::{context_for, envelope};
use carpool_console::core::oauth::{FlowState, OauthLinkFlow};
use carpool_console::core::types::Platform;
use carpool_console::ConsoleError;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn flow_for(server: &MockServer, group: Uuid, platform: Platform) -> OauthLinkFlow {
    let context = context_for(server);
    let client = Arc::clone(context.directory().client());
    OauthLinkFlow::new(client, group, platform)
}

#[tokio::test]
async fn full_linking_flow_correlates_by_session_id() {
    let server = MockServer::start().await;
    let group = Uuid::new_v4();
    let account_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path(format!(
            "/api/groups/{group}/ai-accounts/oauth/generate-auth-url"
        )))
        .and(body_partial_json(json!({ "platform": "claude" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "authUrl": "https://provider.example.com/authorize?client_id=x",
            "sessionId": "sess-42",
        }))))
        .expect(1)
        .mount(&server)
        .await;

    // The exchange must carry the session id from step 1 and the code
    // extracted from the pasted redirect URL.
    Mock::given(method("POST"))
        .and(path(format!(
            "/api/groups/{group}/ai-accounts/oauth/exchange-code"
        )))
        .and(body_partial_json(json!({
            "sessionId": "sess-42",
            "code": "the-code",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": account_id,
            "platform": "claude",
            "authType": "oauth",
            "isEnabled": true,
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let mut flow = flow_for(&server, group, Platform::Claude);
    assert!(matches!(flow.state(), FlowState::AwaitingUrl));

    let auth_url = flow.generate_auth_url().await.unwrap();
    assert!(auth_url.starts_with("https://provider.example.com/"));
    assert!(matches!(flow.state(), FlowState::AwaitingCode { .. }));

    let account = flow
        .exchange_code("https://redirect.example.com/cb?code=the-code&state=s")
        .await
        .unwrap();
    assert_eq!(account.id, account_id);
    assert!(matches!(flow.state(), FlowState::AwaitingUrl));

    server.verify().await;
}

#[tokio::test]
async fn exchange_without_url_or_code_is_refused_offline() {
    let server = MockServer::start().await;
    let group = Uuid::new_v4();

    // No exchange request may ever be issued in this test.
    Mock::given(method("POST"))
        .and(path(format!(
            "/api/groups/{group}/ai-accounts/oauth/exchange-code"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!(
            "/api/groups/{group}/ai-accounts/oauth/generate-auth-url"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "authUrl": "https://provider.example.com/authorize",
            "sessionId": "sess-1",
        }))))
        .mount(&server)
        .await;

    let mut flow = flow_for(&server, group, Platform::Claude);

    // Step 2 before step 1.
    let err = flow.exchange_code("some-code").await.unwrap_err();
    assert!(matches!(err, ConsoleError::FlowState(_)));

    // Step 1 done, but the code is empty.
    flow.generate_auth_url().await.unwrap();
    let err = flow.exchange_code("   ").await.unwrap_err();
    assert!(matches!(err, ConsoleError::Validation(_)));

    server.verify().await;
}

#[tokio::test]
async fn failed_exchange_keeps_flow_in_awaiting_code() {
    let server = MockServer::start().await;
    let group = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path(format!(
            "/api/groups/{group}/ai-accounts/oauth/generate-auth-url"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "authUrl": "https://provider.example.com/authorize",
            "sessionId": "sess-9",
        }))))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!(
            "/api/groups/{group}/ai-accounts/oauth/exchange-code"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "invalid code",
        })))
        .mount(&server)
        .await;

    let mut flow = flow_for(&server, group, Platform::Gemini);
    flow.generate_auth_url().await.unwrap();

    let err = flow.exchange_code("bad-code").await.unwrap_err();
    assert!(matches!(err, ConsoleError::Backend(_)));

    // The user can paste again without regenerating the URL.
    assert!(matches!(flow.state(), FlowState::AwaitingCode { .. }));
    assert!(flow.can_exchange("retry-code"));
}
