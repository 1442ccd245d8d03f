//! Enterprise context and switcher contract tests

use crate::common::{context_for, envelope, membership_json};
use carpool_console::core::types::EnterpriseRole;
use carpool_console::ConsoleError;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{bearer_token, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn switch_enterprise_replaces_current_membership() {
    let server = MockServer::start().await;
    let target = Uuid::new_v4();
    let other = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/api/user/enterprises"))
        .and(bearer_token("test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            membership_json(other, "other", "member", Some("2026-02-01T10:00:00Z")),
            membership_json(target, "acme", "admin", None),
        ]))))
        .mount(&server)
        .await;

    let context = context_for(&server);
    let membership = context.switch_enterprise(target).await.unwrap();

    assert_eq!(membership.enterprise.name, "acme");
    assert_eq!(membership.role, EnterpriseRole::Admin);
    assert_eq!(context.current_enterprise_id(), Some(target));
    assert!(context.has_role(&[EnterpriseRole::Owner, EnterpriseRole::Admin]));
}

#[tokio::test]
async fn failed_switch_leaves_current_unchanged() {
    let server = MockServer::start().await;
    let current = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/api/user/enterprises"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            membership_json(current, "home", "owner", None),
        ]))))
        .mount(&server)
        .await;

    let context = context_for(&server);
    context.switch_enterprise(current).await.unwrap();

    // The target does not appear in the membership list.
    let err = context.switch_enterprise(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, ConsoleError::NotFound(_)));
    assert_eq!(context.current_enterprise_id(), Some(current));
}

#[tokio::test]
async fn selecting_current_enterprise_issues_no_network_call() {
    let server = MockServer::start().await;
    let target = Uuid::new_v4();

    // Exactly one listing fetch is allowed: the initial switch.
    Mock::given(method("GET"))
        .and(path("/api/user/enterprises"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            membership_json(target, "acme", "member", None),
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let context = context_for(&server);
    assert!(context.select(target).await.unwrap().is_some());

    // Redundant selection: guarded, no second request.
    assert!(context.select(target).await.unwrap().is_none());

    server.verify().await;
}

#[tokio::test]
async fn switcher_view_partitions_by_recency() {
    let server = MockServer::start().await;
    let ids: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();

    Mock::given(method("GET"))
        .and(path("/api/user/enterprises"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            membership_json(ids[0], "oldest", "member", Some("2026-01-01T00:00:00Z")),
            membership_json(ids[1], "newest", "member", Some("2026-03-01T00:00:00Z")),
            membership_json(ids[2], "mid", "member", Some("2026-02-01T00:00:00Z")),
            membership_json(ids[3], "older", "member", Some("2026-01-15T00:00:00Z")),
            membership_json(ids[4], "never", "member", None),
        ]))))
        .mount(&server)
        .await;

    let context = context_for(&server);
    let view = context.directory().switcher_view().await.unwrap();

    let recent: Vec<&str> = view.recent.iter().map(|m| m.enterprise.name.as_str()).collect();
    let other: Vec<&str> = view.other.iter().map(|m| m.enterprise.name.as_str()).collect();
    assert_eq!(recent, ["newest", "mid", "older"]);
    assert_eq!(other, ["oldest", "never"]);
}

#[tokio::test]
async fn backend_rejection_surfaces_as_backend_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/enterprises"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "session expired",
        })))
        .mount(&server)
        .await;

    let context = context_for(&server);
    let err = context.directory().list_memberships().await.unwrap_err();
    match err {
        ConsoleError::Backend(msg) => assert_eq!(msg, "session expired"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_2xx_surfaces_as_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/enterprises"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let context = context_for(&server);
    let err = context.directory().list_memberships().await.unwrap_err();
    match err {
        ConsoleError::Api { status, .. } => assert_eq!(status, 503),
        other => panic!("unexpected error: {other:?}"),
    }
}
