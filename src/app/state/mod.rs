use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::app::api::{ApiClient, ApiError, GENERIC_ERROR};
use crate::app::auth::{validate_login, validate_signup, AuthState};
use crate::app::config::Config;
use crate::app::navigation::Navigator;
use crate::app::session::{Session, SessionStore};
use crate::app::storage::{FileStorage, SessionStorage};
use crate::app::types::{AppView, RegisterRequest};

type AuthOutcome = Result<Session, String>;

/// Composition root: owns the session, the API client and navigation, and
/// wires the client's 401 handler to the auth view.
pub struct AppState {
    pub config: Config,
    pub session: Arc<SessionStore>,
    pub api: ApiClient,
    pub navigator: Navigator,
    pub auth_state: AuthState,
    pub username_input: String,
    pub email_input: String,
    pub password_input: String,
    pub confirm_password_input: String,
    pub is_signup_mode: bool,
    pub auth_result: Option<Receiver<AuthOutcome>>,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn SessionStorage>) -> Result<Self, ApiError> {
        let session = Arc::new(SessionStore::new(storage));
        let navigator = Navigator::new(AppView::Auth);
        let on_unauthorized = navigator.clone();
        let api = ApiClient::new(config.clone(), Arc::clone(&session))?
            .with_unauthorized_handler(move || on_unauthorized.navigate(AppView::Auth));

        Ok(Self {
            config,
            session,
            api,
            navigator,
            auth_state: AuthState::new(),
            username_input: String::new(),
            email_input: String::new(),
            password_input: String::new(),
            confirm_password_input: String::new(),
            is_signup_mode: false,
            auth_result: None,
        })
    }

    /// Persist the session under the configured storage directory.
    pub fn with_file_storage(config: Config) -> Result<Self, ApiError> {
        let storage = Arc::new(FileStorage::new(config.storage_dir()));
        Self::new(config, storage)
    }

    /// Restore the persisted session and route to the first view.
    pub fn start(&mut self) -> Session {
        let session = self.session.initialize();
        self.navigator.navigate(if session.is_authenticated() {
            AppView::Lists
        } else {
            AppView::Auth
        });
        tracing::info!("[APP] Started on {}", self.navigator.current().path());
        session
    }

    pub fn current_view(&self) -> AppView {
        self.navigator.current()
    }

    /// Navigate, sending unauthenticated users to the auth view instead.
    pub fn open(&self, view: AppView) {
        if view.requires_session() && !self.session.is_authenticated() {
            self.navigator.navigate(AppView::Auth);
        } else {
            self.navigator.navigate(view);
        }
    }

    pub fn check_auth_result(&mut self) {
        let Some(rx) = &self.auth_result else {
            return;
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(GENERIC_ERROR.to_string()),
        };
        self.auth_result = None;
        self.auth_state.loading = false;

        match outcome {
            Ok(session) => {
                tracing::info!(
                    "[APP] Authentication successful: {}",
                    session
                        .user
                        .as_ref()
                        .map(|u| u.display_name())
                        .unwrap_or_default()
                );
                self.auth_state.clear_error();
                self.navigator.navigate(AppView::Lists);
                self.password_input.clear();
                self.confirm_password_input.clear();
                self.is_signup_mode = false;
            }
            Err(e) => {
                tracing::warn!("[APP] Authentication failed: {}", e);
                self.auth_state.set_error(e);
            }
        }
    }

    pub fn handle_login(&mut self) {
        if self.auth_state.loading {
            return;
        }
        if let Err(e) = validate_login(&self.email_input, &self.password_input) {
            self.auth_state.set_error(e.detail());
            return;
        }

        let identifier = self.email_input.trim().to_string();
        let password = self.password_input.clone();
        self.spawn_auth(move |session, api| async move {
            session.login(&api, &identifier, &password).await
        });
    }

    pub fn handle_signup(&mut self) {
        if self.auth_state.loading {
            return;
        }
        if let Err(e) = validate_signup(
            &self.username_input,
            &self.email_input,
            &self.password_input,
            &self.confirm_password_input,
        ) {
            self.auth_state.set_error(e.detail());
            return;
        }

        let request = RegisterRequest::new(
            self.username_input.trim(),
            self.email_input.trim(),
            self.password_input.clone(),
        );
        self.spawn_auth(move |session, api| async move {
            session.register(&api, &request).await
        });
    }

    /// Run an auth call on a worker thread; the outcome arrives through
    /// `check_auth_result`.
    fn spawn_auth<F, Fut>(&mut self, call: F)
    where
        F: FnOnce(Arc<SessionStore>, ApiClient) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = Result<Session, ApiError>>,
    {
        self.auth_state.loading = true;
        self.auth_state.clear_error();

        let session = Arc::clone(&self.session);
        let api = self.api.clone();
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let outcome = match Runtime::new() {
                Ok(rt) => rt
                    .block_on(call(session, api))
                    .map_err(|e| e.user_message()),
                Err(e) => Err(format!("Failed to create runtime: {}", e)),
            };
            let _ = tx.send(outcome);
        });

        self.auth_result = Some(rx);
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.auth_state = AuthState::new();
        self.navigator.navigate(AppView::Auth);
        self.username_input.clear();
        self.email_input.clear();
        self.password_input.clear();
        self.confirm_password_input.clear();
    }

    pub fn toggle_auth_mode(&mut self) {
        self.is_signup_mode = !self.is_signup_mode;
        self.auth_state.clear_error();
        self.password_input.clear();
        self.confirm_password_input.clear();
    }
}
