//! Tests for engine module

use super::*;
use crate::config::{ConnectionConfig, EnvSnapshot};
use crate::error::ErrorClass;
use crate::filter::{Operator, Qualifier};
use crate::pagination::StopSignal;
use crate::resources::{Issue, Project};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Matches GraphQL requests whose `variables` lack `name`
struct NoVariable(&'static str);

impl Match for NoVariable {
    fn matches(&self, request: &Request) -> bool {
        serde_json::from_slice::<JsonValue>(&request.body)
            .map(|body| body["variables"].get(self.0).is_none())
            .unwrap_or(false)
    }
}

fn engine_for(server: &MockServer) -> Engine {
    let connection = Connection::new(
        "test",
        ConnectionConfig::new()
            .with_url(format!("{}/graphql", server.uri()))
            .with_api_token("test-token"),
    );
    Engine::new(
        Arc::new(ConnectionCache::with_env(EnvSnapshot::empty())),
        connection,
    )
}

fn issues_page(ids: &[&str], next: Option<&str>) -> JsonValue {
    let nodes: Vec<_> = ids.iter().map(|id| json!({ "id": id })).collect();
    json!({
        "data": {
            "issues": {
                "nodes": nodes,
                "pageInfo": { "hasNextPage": next.is_some(), "endCursor": next },
                "totalCount": 1000
            }
        }
    })
}

async fn collect<T>(stream: RecordStream<T>) -> Vec<Result<T>> {
    stream.collect().await
}

fn ids(issues: Vec<Result<Issue>>) -> Vec<String> {
    issues.into_iter().map(|i| i.unwrap().id).collect()
}

// ============================================================================
// List
// ============================================================================

#[tokio::test]
async fn test_list_sends_filter_and_follows_cursor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("query ListIssues"))
        .and(NoVariable("after"))
        .and(body_partial_json(json!({
            "variables": { "first": 500, "filter": { "severity": "HIGH" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(issues_page(&["a", "b"], Some("c1"))))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "variables": { "after": "c1", "filter": { "severity": "HIGH" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(issues_page(&["c"], None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let request = ListRequest::new()
        .qualifier(Qualifier::eq("severity", "HIGH"))
        .qualifier(Qualifier::eq("unsupported", "x"));

    let records = collect(engine.list::<Issues>(request).await.unwrap()).await;
    assert_eq!(ids(records), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_list_timestamp_range_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "variables": {
                "filter": {
                    "createdAt": {
                        "after": "2024-03-01T11:59:58Z",
                        "before": "2024-03-01T12:00:02Z"
                    }
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(issues_page(&["a"], None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let request = ListRequest::new().qualifier(Qualifier::new(
        "created_at",
        Operator::Eq,
        "2024-03-01T12:00:00Z",
    ));

    let records = collect(engine.list::<Issues>(request).await.unwrap()).await;
    assert_eq!(ids(records), vec!["a"]);
}

#[tokio::test]
async fn test_list_without_filterable_fields_sends_no_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("query ListProjects"))
        .and(NoVariable("filter"))
        .and(body_partial_json(json!({ "variables": { "first": 100 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "projects": {
                    "nodes": [{ "id": "p-1", "name": "prod", "archived": false }],
                    "pageInfo": { "hasNextPage": false, "endCursor": null }
                }
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let request = ListRequest::new().qualifier(Qualifier::eq("name", "prod"));

    let records: Vec<Result<Project>> =
        collect(engine.list::<Projects>(request).await.unwrap()).await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].as_ref().unwrap().name, "prod");
}

#[tokio::test]
async fn test_list_limit_caps_page_size_and_records() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "first": 2 } })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(issues_page(&["a", "b", "c"], Some("c1"))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let records = collect(engine.list::<Issues>(ListRequest::new().limit(2)).await.unwrap()).await;
    assert_eq!(ids(records), vec!["a", "b"]);
}

#[tokio::test]
async fn test_list_stop_signal_mid_page() {
    let mock_server = MockServer::start().await;
    let ten: Vec<String> = (0..10).map(|i| format!("i-{i}")).collect();
    let ten: Vec<&str> = ten.iter().map(String::as_str).collect();

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(issues_page(&ten, Some("c1"))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let stop = StopSignal::new();
    let mut stream = engine
        .list::<Issues>(ListRequest::new().stop_signal(stop.clone()))
        .await
        .unwrap();

    let mut seen = Vec::new();
    while let Some(issue) = stream.next().await {
        seen.push(issue.unwrap().id);
        if seen.len() == 3 {
            stop.stop();
        }
    }
    assert_eq!(seen, vec!["i-0", "i-1", "i-2"]);
}

#[tokio::test]
async fn test_list_error_after_partial_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(NoVariable("after"))
        .respond_with(ResponseTemplate::new(200).set_body_json(issues_page(&["a"], Some("c1"))))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "after": "c1" } })))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let records = collect(engine.list::<Issues>(ListRequest::new()).await.unwrap()).await;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].as_ref().unwrap().id, "a");
    let err = records[1].as_ref().unwrap_err();
    assert_eq!(err.class(), ErrorClass::Remote);
}

#[tokio::test]
async fn test_list_missing_root_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "issues": null } })))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let records = collect(engine.list::<Issues>(ListRequest::new()).await.unwrap()).await;

    assert_eq!(records.len(), 1);
    assert!(matches!(records[0], Err(Error::Decode { .. })));
}

#[tokio::test]
async fn test_list_config_error_before_stream() {
    let engine = Engine::new(
        Arc::new(ConnectionCache::with_env(EnvSnapshot::empty())),
        Connection::new("broken", ConnectionConfig::new()),
    );

    let err = engine
        .list::<Issues>(ListRequest::new())
        .await
        .err()
        .unwrap();
    assert_eq!(err.class(), ErrorClass::Config);
}

#[tokio::test]
async fn test_list_pages_exposes_cursor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(issues_page(&["a", "b"], Some("c1"))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let mut pages = engine
        .list_pages::<Issues>(ListRequest::new().limit(2))
        .await
        .unwrap();

    let page = pages.next().await.unwrap().unwrap();
    assert_eq!(page.nodes.len(), 2);
    assert_eq!(page.page_info.end_cursor.as_deref(), Some("c1"));
    assert_eq!(page.total_count, Some(1000));
    assert!(pages.next().await.is_none());
}

#[tokio::test]
async fn test_list_resumes_after_cursor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "after": "c9" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(issues_page(&["z"], None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let records = collect(
        engine
            .list::<Issues>(ListRequest::new().after("c9"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(ids(records), vec!["z"]);
}

#[tokio::test]
async fn test_list_values_by_kind() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("query ListIssues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(issues_page(&["a"], None)))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let values = collect(
        engine
            .list_values(ResourceKind::Issue, ListRequest::new())
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(values.len(), 1);
    let value = values.into_iter().next().unwrap().unwrap();
    assert_eq!(value["id"], json!("a"));
    assert_eq!(value["notes"], json!([]));
}

#[tokio::test]
async fn test_list_security_categories_by_framework() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("query ListSecurityCategories"))
        .and(body_partial_json(json!({
            "variables": { "first": 500, "filter": { "frameworkId": "f-1" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "securityCategories": {
                    "nodes": [
                        { "id": "cat-1", "name": "Logging", "framework": { "id": "f-1" } }
                    ],
                    "pageInfo": { "hasNextPage": false, "endCursor": null },
                    "totalCount": 1
                }
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let request = ListRequest::new().qualifier(Qualifier::eq("framework_id", "f-1"));
    let values = collect(
        engine
            .list_values(ResourceKind::SecurityCategory, request)
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(values.len(), 1);
    let value = values.into_iter().next().unwrap().unwrap();
    assert_eq!(value["framework"]["id"], json!("f-1"));
    assert_eq!(value["subCategories"], json!([]));
}

// ============================================================================
// Get
// ============================================================================

#[tokio::test]
async fn test_get_decodes_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("query GetIssue"))
        .and(body_partial_json(json!({ "variables": { "id": "i-1" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "issue": { "id": "i-1", "severity": "LOW" } }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let issue = engine.get::<Issues>("i-1").await.unwrap().unwrap();
    assert_eq!(issue.id, "i-1");
    assert_eq!(issue.severity.as_deref(), Some("LOW"));
}

#[tokio::test]
async fn test_get_empty_id_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    assert_eq!(engine.get::<Issues>("").await.unwrap(), None);
}

#[tokio::test]
async fn test_get_not_found_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "issue": null },
            "errors": [{ "message": "Resource not found", "path": ["issue"] }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    assert_eq!(engine.get::<Issues>("missing").await.unwrap(), None);
}

#[tokio::test]
async fn test_get_null_root_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "issue": null } })),
        )
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    assert_eq!(engine.get::<Issues>("i-1").await.unwrap(), None);
}

#[tokio::test]
async fn test_get_other_errors_propagate() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "Unauthorized" }]
        })))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let err = engine.get::<Issues>("i-1").await.unwrap_err();
    assert_eq!(err.class(), ErrorClass::Remote);
    assert!(err.to_string().contains("Unauthorized"));
}

#[tokio::test]
async fn test_get_unsupported_resource() {
    let mock_server = MockServer::start().await;
    let engine = engine_for(&mock_server);

    let err = engine.get::<UserRoles>("r-1").await.unwrap_err();
    assert_eq!(err.class(), ErrorClass::Config);
    assert!(err.to_string().contains("wiz_user_role"));
}

#[tokio::test]
async fn test_get_value_by_kind() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("query GetSubscription"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "cloudAccount": { "id": "s-1", "cloudProvider": "AWS" } }
        })))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let value = engine
        .get_value(ResourceKind::Subscription, "s-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(value["cloudProvider"], json!("AWS"));
}
