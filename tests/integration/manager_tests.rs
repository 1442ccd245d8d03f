//! Resource manager contract tests

use crate::common::{context_for, department_json, envelope, membership_json};
use carpool_console::core::managers::{BudgetManager, DepartmentManager, InviteManager};
use carpool_console::core::types::{BudgetInput, DepartmentInput, EnterpriseRole};
use carpool_console::{ConsoleError, SharedContext};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Switch the context into an enterprise with the given role
async fn signed_in(server: &MockServer, role: &str) -> (SharedContext, Uuid) {
    let enterprise_id = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path("/api/user/enterprises"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            membership_json(enterprise_id, "acme", role, None),
        ]))))
        .mount(server)
        .await;

    let context = context_for(server);
    context.switch_enterprise(enterprise_id).await.unwrap();
    (context, enterprise_id)
}

#[tokio::test]
async fn department_create_refetches_full_list() {
    let server = MockServer::start().await;
    let (context, enterprise_id) = signed_in(&server, "admin").await;
    let dept_path = format!("/api/enterprises/{enterprise_id}/departments");

    Mock::given(method("POST"))
        .and(path(dept_path.clone()))
        .and(body_partial_json(json!({ "name": "engineering" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    // The mutation is followed by one full refetch, not a cache patch.
    let created = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path(dept_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            department_json(created, "engineering", None),
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let manager = DepartmentManager::new(context);
    let list = manager
        .create(&DepartmentInput {
            name: "engineering".to_string(),
            parent_id: None,
            budget_limit: None,
        })
        .await
        .unwrap();

    assert_eq!(list.len(), 1);
    assert_eq!(manager.snapshot().len(), 1);
    server.verify().await;
}

#[tokio::test]
async fn member_cannot_mutate_departments() {
    let server = MockServer::start().await;
    let (context, _) = signed_in(&server, "member").await;

    let manager = DepartmentManager::new(context);
    let err = manager
        .create(&DepartmentInput {
            name: "shadow".to_string(),
            parent_id: None,
            budget_limit: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ConsoleError::Authorization(_)));
}

#[tokio::test]
async fn parent_candidates_exclude_subtree_after_fetch() {
    let server = MockServer::start().await;
    let (context, enterprise_id) = signed_in(&server, "admin").await;

    let root = Uuid::new_v4();
    let child = Uuid::new_v4();
    let grandchild = Uuid::new_v4();
    let sibling = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/api/enterprises/{enterprise_id}/departments")))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            department_json(root, "root", None),
            department_json(child, "child", Some(root)),
            department_json(grandchild, "grandchild", Some(child)),
            department_json(sibling, "sibling", Some(root)),
        ]))))
        .mount(&server)
        .await;

    let manager = DepartmentManager::new(context);
    manager.refresh().await.unwrap();

    let candidates: Vec<Uuid> = manager.parent_candidates(child).iter().map(|d| d.id).collect();
    assert!(candidates.contains(&root));
    assert!(candidates.contains(&sibling));
    assert!(!candidates.contains(&child));
    assert!(!candidates.contains(&grandchild));
}

#[tokio::test]
async fn owner_can_set_budget_member_cannot() {
    let server = MockServer::start().await;
    let (context, enterprise_id) = signed_in(&server, "owner").await;

    Mock::given(method("PUT"))
        .and(path(format!("/api/enterprises/{enterprise_id}/budget")))
        .and(body_partial_json(json!({ "budgetLimit": 500_000 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let input = BudgetInput {
        department_id: None,
        budget_limit: 500_000,
    };
    BudgetManager::new(context).set_budget(&input).await.unwrap();

    let member_server = MockServer::start().await;
    let (member_context, _) = signed_in(&member_server, "member").await;
    let err = BudgetManager::new(member_context)
        .set_budget(&input)
        .await
        .unwrap_err();
    assert!(matches!(err, ConsoleError::Authorization(_)));
}

#[tokio::test]
async fn costs_pass_time_range_query() {
    let server = MockServer::start().await;
    let (context, enterprise_id) = signed_in(&server, "member").await;

    Mock::given(method("GET"))
        .and(path(format!("/api/enterprises/{enterprise_id}/costs")))
        .and(query_param("timeRange", "week"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "totalCost": 1234.0,
            "totalTokens": 56789,
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let summary = BudgetManager::new(context)
        .costs(carpool_console::core::types::TimeRange::Week)
        .await
        .unwrap();
    assert_eq!(summary.total_tokens, 56789);
    server.verify().await;
}

#[tokio::test]
async fn oversized_invite_batch_never_reaches_the_network() {
    let server = MockServer::start().await;
    let (context, enterprise_id) = signed_in(&server, "admin").await;

    Mock::given(method("POST"))
        .and(path(format!("/api/enterprises/{enterprise_id}/invites")))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .expect(0)
        .mount(&server)
        .await;

    let emails: Vec<String> = (0..51).map(|i| format!("user{i}@example.com")).collect();
    let raw: Vec<&str> = emails.iter().map(String::as_str).collect();

    let err = InviteManager::new(context)
        .batch_invite(&raw, EnterpriseRole::Member)
        .await
        .unwrap_err();
    assert!(matches!(err, ConsoleError::Validation(_)));
    server.verify().await;
}

#[tokio::test]
async fn malformed_invites_are_filtered_before_submission() {
    let server = MockServer::start().await;
    let (context, enterprise_id) = signed_in(&server, "admin").await;

    // The submitted body contains only the two well-formed addresses.
    Mock::given(method("POST"))
        .and(path(format!("/api/enterprises/{enterprise_id}/invites")))
        .and(body_partial_json(json!({
            "emails": ["a@example.com", "b@example.com"],
            "role": "member",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            { "email": "a@example.com", "success": true },
            { "email": "b@example.com", "success": false, "error": "already a member" },
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let report = InviteManager::new(context)
        .batch_invite(
            &["a@example.com", "not an email", "b@example.com"],
            EnterpriseRole::Member,
        )
        .await
        .unwrap();

    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.dropped, vec!["not an email"]);
    server.verify().await;
}
