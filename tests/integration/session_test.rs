//! Session lifecycle against the mock backend: login, register, reload,
//! logout and expiry.

use std::sync::Arc;

use assert_matches::assert_matches;
use kobun_vocab::app::{ApiError, AppView, RegisterRequest, SessionStorage, SessionStore, TOKEN_KEY};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::*;

async fn mount_login(backend: &TestBackend, response: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(api_path("/auth/login")))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&backend.server)
        .await;
}

#[tokio::test]
async fn test_login_scenario_stores_token_and_user() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/auth/login")))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("username=a%40b.com"))
        .and(body_string_contains("password=secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "abc123",
            "user": {"id": 7, "username": "a"}
        })))
        .expect(1)
        .mount(&backend.server)
        .await;

    let session = crate::assert_ok!(backend.session.login(&backend.api, "a@b.com", "secret").await);

    assert!(session.is_authenticated());
    assert_eq!(session.token.as_deref(), Some("abc123"));
    assert_eq!(backend.storage.get(TOKEN_KEY).as_deref(), Some("abc123"));
    assert_eq!(
        stored_user(&backend.storage),
        Some(json!({"id": 7, "username": "a"}))
    );
    assert!(backend.session.is_authenticated());
}

#[tokio::test]
async fn test_login_then_reload_restores_same_session() {
    let backend = TestBackend::start().await;
    mount_login(
        &backend,
        json!({"access_token": "abc123", "user": {"id": 7, "username": "a"}}),
    )
    .await;

    let logged_in = backend
        .session
        .login(&backend.api, "a@b.com", "secret")
        .await
        .unwrap();

    // A reload is a fresh store over the same storage
    let reloaded = SessionStore::new(backend.storage.clone());
    assert!(!reloaded.is_ready());
    let restored = reloaded.initialize();

    assert!(reloaded.is_ready());
    assert_eq!(restored, logged_in);
    assert!(restored.is_authenticated());
}

#[tokio::test]
async fn test_login_accepts_token_field() {
    let backend = TestBackend::start().await;
    mount_login(
        &backend,
        json!({"token": "xyz789", "user": {"id": 7, "username": "a"}}),
    )
    .await;

    let session = backend
        .session
        .login(&backend.api, "a@b.com", "secret")
        .await
        .unwrap();

    assert_eq!(session.token.as_deref(), Some("xyz789"));
    assert_eq!(backend.storage.get(TOKEN_KEY).as_deref(), Some("xyz789"));
}

#[tokio::test]
async fn test_login_without_user_derives_identity_from_token() {
    let backend = TestBackend::start().await;
    let token = valid_token();
    mount_login(
        &backend,
        json!({"access_token": token, "token_type": "bearer"}),
    )
    .await;

    let session = backend
        .session
        .login(&backend.api, "a@b.com", "secret")
        .await
        .unwrap();

    let user = session.user.unwrap();
    assert_eq!(user.id.to_string(), "7");
    assert_eq!(user.email.as_deref(), Some("a@b.com"));
}

#[tokio::test]
async fn test_login_keeps_backend_user_record_without_id() {
    let backend = TestBackend::start().await;
    mount_login(
        &backend,
        json!({
            "access_token": "abc123",
            "user": {"username": "a", "email": "a@b.com", "full_name": "A", "id": null}
        }),
    )
    .await;

    let session = backend
        .session
        .login(&backend.api, "a@b.com", "secret")
        .await
        .unwrap();

    let user = session.user.unwrap();
    assert_eq!(user.full_name.as_deref(), Some("A"));
    assert_eq!(user.username.as_deref(), Some("a"));
    assert_eq!(
        stored_user(&backend.storage),
        Some(json!({"id": "a@b.com", "username": "a", "email": "a@b.com", "full_name": "A"}))
    );

    // The record survives a reload
    let reloaded = SessionStore::new(backend.storage.clone());
    assert_eq!(
        reloaded.initialize().user.and_then(|u| u.full_name).as_deref(),
        Some("A")
    );
}

#[tokio::test]
async fn test_login_response_without_token_is_an_error() {
    let backend = TestBackend::start().await;
    mount_login(&backend, json!({"user": {"id": 7}})).await;

    let result = backend.session.login(&backend.api, "a@b.com", "secret").await;

    assert_matches!(result, Err(ApiError::MissingToken));
    assert!(!backend.session.is_authenticated());
    assert!(backend.storage.is_empty());
}

#[tokio::test]
async fn test_login_failure_surfaces_backend_detail() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/auth/login")))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"detail": "Incorrect username or password"})),
        )
        .mount(&backend.server)
        .await;

    let err = backend
        .session
        .login(&backend.api, "a@b.com", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Incorrect username or password");
    assert!(!backend.session.is_authenticated());
    assert_eq!(backend.unauthorized_count(), 0);
}

#[tokio::test]
async fn test_register_logs_in_automatically() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/auth/register")))
        .and(body_json(json!({
            "username": "a",
            "email": "a@b.com",
            "password": "secret",
            "full_name": "a"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 7, "username": "a"})),
        )
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("/auth/login")))
        .and(body_string_contains("username=a%40b.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "abc123",
            "user": {"id": 7, "username": "a"}
        })))
        .expect(1)
        .mount(&backend.server)
        .await;

    let request = RegisterRequest::new("a", "a@b.com", "secret");
    backend.session.register(&backend.api, &request).await.unwrap();

    let current = backend.session.current_session();
    assert!(current.is_authenticated());
    assert_eq!(current.token.as_deref(), Some("abc123"));

    let paths: Vec<String> = backend
        .requests()
        .await
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(paths, vec![api_path("/auth/register"), api_path("/auth/login")]);
}

#[tokio::test]
async fn test_register_failure_does_not_attempt_login() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/auth/register")))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Email already registered"})),
        )
        .mount(&backend.server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("/auth/login")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "x"})))
        .expect(0)
        .mount(&backend.server)
        .await;

    let request = RegisterRequest::new("a", "a@b.com", "secret").with_full_name("A. Person");
    let err = backend
        .session
        .register(&backend.api, &request)
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Email already registered");
    assert!(!backend.session.is_authenticated());
}

#[tokio::test]
async fn test_logout_clears_memory_and_storage() {
    let storage = Arc::new(persisted_session("abc123", &json!({"id": 7, "username": "a"})));
    let backend = TestBackend::with_storage(storage).await;
    assert!(backend.session.is_authenticated());

    backend.session.logout();
    crate::assert_logged_out!(backend.session, backend.storage);

    // Idempotent
    backend.session.logout();
    crate::assert_logged_out!(backend.session, backend.storage);
    assert_eq!(backend.navigator.current(), AppView::Lists);
}

#[tokio::test]
async fn test_initialize_with_expired_token_purges() {
    let storage = Arc::new(persisted_session(
        &expired_token(),
        &json!({"id": 7, "username": "a"}),
    ));
    let backend = TestBackend::with_storage(storage).await;

    assert!(backend.session.is_ready());
    crate::assert_logged_out!(backend.session, backend.storage);
    assert!(backend.storage.is_empty());
}

#[tokio::test]
async fn test_initialize_with_corrupt_user_purges() {
    let storage = Arc::new(kobun_vocab::app::MemoryStorage::new());
    storage.set(TOKEN_KEY, "abc123").unwrap();
    storage.set(kobun_vocab::app::USER_KEY, "{not json").unwrap();
    let backend = TestBackend::with_storage(storage).await;

    crate::assert_logged_out!(backend.session, backend.storage);
}

#[tokio::test]
async fn test_authenticated_requests_carry_bearer_token() {
    let token = valid_token();
    let storage = Arc::new(persisted_session(&token, &json!({"id": 7, "username": "a"})));
    let backend = TestBackend::with_storage(storage).await;
    Mock::given(method("GET"))
        .and(path(api_path("/wordlists")))
        .and(header("authorization", auth_header(&token).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&backend.server)
        .await;

    let lists = backend.api.word_lists().await.unwrap();
    assert!(lists.is_empty());
}
