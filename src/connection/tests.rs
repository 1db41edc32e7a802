//! Tests for the connection module

use super::*;
use crate::auth::CredentialSource;
use crate::config::{EnvSnapshot, ENV_API_TOKEN, ENV_URL};
use crate::error::ErrorClass;
use crate::types::JsonValue;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token_connection(name: &str, server: &MockServer) -> Connection {
    Connection::new(
        name,
        ConnectionConfig::new()
            .with_url(format!("{}/graphql", server.uri()))
            .with_api_token("static-token"),
    )
}

fn oauth_connection(name: &str, server: &MockServer) -> Connection {
    Connection::new(
        name,
        ConnectionConfig::new()
            .with_url(format!("{}/graphql", server.uri()))
            .with_auth_url(format!("{}/oauth/token", server.uri()))
            .with_client_credentials("client", "secret"),
    )
}

#[tokio::test]
async fn test_concurrent_first_use_builds_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access_token": "shared", "expires_in": 3600 }))
                .set_delay(Duration::from_millis(50)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache = ConnectionCache::with_env(EnvSnapshot::empty());
    let connection = oauth_connection("prod", &mock_server);

    let (a, b) = tokio::join!(
        cache.get_or_create(&connection),
        cache.get_or_create(&connection)
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn test_cached_client_is_reused() {
    let mock_server = MockServer::start().await;
    let cache = ConnectionCache::with_env(EnvSnapshot::empty());
    let connection = token_connection("prod", &mock_server);

    let first = cache.get_or_create(&connection).await.unwrap();
    let second = cache.get_or_create(&connection).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(cache.contains("prod").await);
    assert_eq!(first.credentials().source, CredentialSource::ConfigApiToken);
    assert_eq!(first.endpoint(), format!("{}/graphql", mock_server.uri()));
}

#[tokio::test]
async fn test_cache_key_is_connection_name() {
    let mock_server = MockServer::start().await;
    let cache = ConnectionCache::with_env(EnvSnapshot::empty());

    let first = cache
        .get_or_create(&token_connection("prod", &mock_server))
        .await
        .unwrap();

    // Same name with a different config still returns the cached client
    let renamed = Connection::new(
        "prod",
        ConnectionConfig::new()
            .with_url("https://other.example.com/graphql")
            .with_api_token("other"),
    );
    let again = cache.get_or_create(&renamed).await.unwrap();
    assert!(Arc::ptr_eq(&first, &again));

    let other = cache
        .get_or_create(&token_connection("staging", &mock_server))
        .await
        .unwrap();
    assert!(!Arc::ptr_eq(&first, &other));
    assert_eq!(cache.len().await, 2);
}

#[tokio::test]
async fn test_config_error_before_any_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let cache = ConnectionCache::with_env(EnvSnapshot::empty());
    let connection = Connection::new(
        "prod",
        ConnectionConfig::new().with_url(format!("{}/graphql", mock_server.uri())),
    );

    let err = cache.get_or_create(&connection).await.unwrap_err();
    assert_eq!(err.class(), ErrorClass::Config);
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn test_failed_init_is_retried() {
    let mock_server = MockServer::start().await;
    let cache = ConnectionCache::with_env(EnvSnapshot::empty());

    let broken = Connection::new("prod", ConnectionConfig::new());
    assert!(cache.get_or_create(&broken).await.is_err());
    assert!(!cache.contains("prod").await);

    let fixed = token_connection("prod", &mock_server);
    assert!(cache.get_or_create(&fixed).await.is_ok());
    assert!(cache.contains("prod").await);
}

#[tokio::test]
async fn test_auth_failure_surfaces_from_construction() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid_client"))
        .mount(&mock_server)
        .await;

    let cache = ConnectionCache::with_env(EnvSnapshot::empty());
    let err = cache
        .get_or_create(&oauth_connection("prod", &mock_server))
        .await
        .unwrap_err();

    assert_eq!(err.class(), ErrorClass::Auth);
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn test_env_fallback_and_bearer_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", "Bearer env-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "ok": true } })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let env = EnvSnapshot::empty()
        .with_var(ENV_URL, format!("{}/graphql", mock_server.uri()))
        .with_var(ENV_API_TOKEN, "env-token");
    let cache = ConnectionCache::with_env(env);

    let client = cache
        .get_or_create(&Connection::new("default", ConnectionConfig::new()))
        .await
        .unwrap();
    assert_eq!(client.credentials().source, CredentialSource::EnvApiToken);

    let data: JsonValue = client
        .execute("query { ok }", &json!({}))
        .await
        .unwrap();
    assert_eq!(data, json!({ "ok": true }));
}
