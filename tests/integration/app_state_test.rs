//! The composition root driving login and signup against the mock backend.

use std::sync::Arc;
use std::time::Duration;

use kobun_vocab::app::{AppState, AppView, Config, MemoryStorage};
use kobun_vocab::shared::AppConfig;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::*;

async fn app_state(server: &MockServer, storage: Arc<MemoryStorage>) -> AppState {
    let config = Config::with_builder(
        AppConfig::builder()
            .api_url(format!("{}{}", server.uri(), API_PREFIX))
            .request_timeout_secs(5),
    )
    .unwrap();
    let mut state = AppState::new(config, storage).unwrap();
    state.start();
    state
}

/// Poll until the background auth call has reported back.
async fn settle(state: &mut AppState) {
    for _ in 0..200 {
        state.check_auth_result();
        if state.auth_result.is_none() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    panic!("auth result never arrived");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_flow_routes_to_lists() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/auth/login")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "abc123",
            "user": {"id": 7, "username": "a"}
        })))
        .mount(&server)
        .await;
    let mut state = app_state(&server, Arc::new(MemoryStorage::new())).await;
    assert_eq!(state.current_view(), AppView::Auth);

    state.email_input = "a@b.com".into();
    state.password_input = "secret".into();
    state.handle_login();
    assert!(state.auth_state.loading);
    // A second submit while the first is in flight is ignored
    state.handle_login();
    settle(&mut state).await;

    assert!(!state.auth_state.loading);
    assert!(state.auth_state.error.is_none());
    assert_eq!(state.current_view(), AppView::Lists);
    assert!(state.password_input.is_empty());
    assert!(state.session.is_authenticated());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_failure_shows_inline_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/auth/login")))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"detail": "Incorrect username or password"})),
        )
        .mount(&server)
        .await;
    let mut state = app_state(&server, Arc::new(MemoryStorage::new())).await;

    state.email_input = "a@b.com".into();
    state.password_input = "wrong".into();
    state.handle_login();
    settle(&mut state).await;

    assert_eq!(
        state.auth_state.error.as_deref(),
        Some("Incorrect username or password")
    );
    assert_eq!(state.current_view(), AppView::Auth);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_signup_flow_logs_in() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/auth/register")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("/auth/login")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "abc123",
            "user": {"id": 7, "username": "a"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let mut state = app_state(&server, Arc::new(MemoryStorage::new())).await;

    state.toggle_auth_mode();
    state.username_input = "a".into();
    state.email_input = "a@b.com".into();
    state.password_input = "secret".into();
    state.confirm_password_input = "secret".into();
    state.handle_signup();
    settle(&mut state).await;

    assert!(!state.is_signup_mode);
    assert_eq!(state.current_view(), AppView::Lists);
    assert_eq!(state.session.token().as_deref(), Some("abc123"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_401_returns_app_to_auth_view() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/stats/me")))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let storage = Arc::new(persisted_session("abc123", &json!({"id": 7})));
    let mut state = app_state(&server, storage).await;
    assert_eq!(state.current_view(), AppView::Lists);
    state.open(AppView::Stats);

    let err = state.api.user_stats().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(state.current_view(), AppView::Auth);
    assert!(!state.session.is_authenticated());
    state.open(AppView::Stats);
    assert_eq!(state.current_view(), AppView::Auth);
}
