//! Mock backend helpers for integration tests
//!
//! `TestBackend` starts a wiremock server and builds the client stack
//! against it the same way `AppState` does, with a counting unauthorized
//! handler in place of the UI.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use kobun_vocab::app::{ApiClient, AppView, Config, MemoryStorage, Navigator, SessionStore};
use kobun_vocab::shared::AppConfig;
use wiremock::{MockServer, Request};

/// Path prefix the client is configured with, as in the default `/api` base
pub const API_PREFIX: &str = "/api";

pub struct TestBackend {
    pub server: MockServer,
    pub storage: Arc<MemoryStorage>,
    pub session: Arc<SessionStore>,
    pub api: ApiClient,
    pub navigator: Navigator,
    unauthorized: Arc<AtomicUsize>,
}

impl TestBackend {
    /// Empty storage, already initialized.
    pub async fn start() -> Self {
        Self::with_storage(Arc::new(MemoryStorage::new())).await
    }

    /// Build the stack over `storage` and run `initialize` on it.
    pub async fn with_storage(storage: Arc<MemoryStorage>) -> Self {
        let server = MockServer::start().await;
        let config = Config::with_builder(
            AppConfig::builder()
                .api_url(format!("{}{}", server.uri(), API_PREFIX))
                .request_timeout_secs(5),
        )
        .expect("mock server URL is valid");

        let session = Arc::new(SessionStore::new(storage.clone()));
        session.initialize();

        // Start away from the auth view so a redirect is observable
        let navigator = Navigator::new(AppView::Lists);
        let unauthorized = Arc::new(AtomicUsize::new(0));
        let handler_navigator = navigator.clone();
        let handler_count = Arc::clone(&unauthorized);
        let api = ApiClient::new(config, Arc::clone(&session))
            .expect("client builds")
            .with_unauthorized_handler(move || {
                handler_count.fetch_add(1, Ordering::SeqCst);
                handler_navigator.navigate(AppView::Auth);
            });

        Self {
            server,
            storage,
            session,
            api,
            navigator,
            unauthorized,
        }
    }

    /// Times the unauthorized handler has fired.
    pub fn unauthorized_count(&self) -> usize {
        self.unauthorized.load(Ordering::SeqCst)
    }

    /// Requests the server has seen so far.
    pub async fn requests(&self) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .expect("request recording is enabled")
    }

    /// The single request the server has seen.
    pub async fn only_request(&self) -> Request {
        let mut requests = self.requests().await;
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.remove(0)
    }
}

/// Full mock path for an API path.
pub fn api_path(path: &str) -> String {
    format!("{}{}", API_PREFIX, path)
}

/// `Authorization` header of a recorded request, if any.
pub fn authorization(request: &Request) -> Option<String> {
    request
        .headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

pub fn content_type(request: &Request) -> String {
    request
        .headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
