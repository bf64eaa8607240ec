//! Backend API Client
//!
//! `ApiClient` is the single path every backend call takes. It owns the two
//! cross-cutting behaviours of the client:
//!
//! - **Credential attachment**: when the session holds a token it is sent as
//!   `Authorization: Bearer <token>`; without one no header is sent at all.
//! - **Session invalidation**: a 401 from any endpoint clears the session and
//!   fires the unauthorized handler (wired to navigation by `AppState`)
//!   before the error reaches the caller.
//!
//! Resource methods live in the submodules (`auth`, `lists`, `words`, `ocr`,
//! `stats`, `quiz`) as further `impl ApiClient` blocks and only describe the
//! method, path and body of each call.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use kobun_vocab::app::{ApiClient, Config, MemoryStorage, SessionStore};
//!
//! # async fn example() -> Result<(), kobun_vocab::app::ApiError> {
//! let session = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
//! let api = ApiClient::new(Config::new(), session)?
//!     .with_unauthorized_handler(|| println!("back to login"));
//! let lists = api.word_lists().await?;
//! # Ok(())
//! # }
//! ```

mod auth;
pub mod error;
mod lists;
mod ocr;
mod quiz;
mod stats;
mod words;

use std::fmt;
use std::sync::Arc;

use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::app::config::Config;
use crate::app::session::SessionStore;

pub use error::{ApiError, GENERIC_ERROR};

/// Callback fired after a 401 has cleared the session
pub type UnauthorizedHandler = Arc<dyn Fn() + Send + Sync>;

/// Authenticated HTTP client for the vocabulary backend
#[derive(Clone)]
pub struct ApiClient {
    config: Config,
    client: Client,
    session: Arc<SessionStore>,
    on_unauthorized: Option<UnauthorizedHandler>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url())
            .field("authenticated", &self.session.is_authenticated())
            .field("has_unauthorized_handler", &self.on_unauthorized.is_some())
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: Config, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self {
            config,
            client,
            session,
            on_unauthorized: None,
        })
    }

    /// Register the callback fired after a 401 has cleared the session.
    pub fn with_unauthorized_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_unauthorized = Some(Arc::new(handler));
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!("[API] {} {}", method, path);
        let builder = self.client.request(method, self.config.api_url(path));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and return the raw body of a successful response.
    async fn execute(&self, builder: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!("[API] Transport failure: {}", e);
            ApiError::Network(e)
        })?;
        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body.to_vec(),
            Err(e) if status.is_success() => return Err(ApiError::Network(e)),
            // The status alone decides a failure; a lost body only loses the detail
            Err(e) => {
                tracing::warn!("[API] Failed to read {} response body: {}", status, e);
                Vec::new()
            }
        };
        if status.is_success() {
            return Ok(body);
        }

        let error = ApiError::from_response(status, &body);
        if error.is_unauthorized() {
            self.handle_unauthorized();
        } else {
            tracing::debug!("[API] Request failed with {}: {}", status, error.user_message());
        }
        Err(error)
    }

    fn handle_unauthorized(&self) {
        tracing::warn!("[API] Received 401, clearing session");
        self.session.logout();
        if let Some(handler) = &self.on_unauthorized {
            handler();
        }
    }

    async fn dispatch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let body = self.execute(builder).await?;
        decode_body(&body)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.dispatch(self.request(Method::GET, path)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.dispatch(self.request(Method::DELETE, path)).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.dispatch(self.request(Method::POST, path).json(body)).await
    }

    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.dispatch(self.request(Method::PUT, path).json(body)).await
    }

    /// `application/x-www-form-urlencoded` POST; only the login endpoint uses this.
    pub(crate) async fn post_form<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.dispatch(self.request(Method::POST, path).form(body)).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        self.dispatch(self.request(Method::POST, path).multipart(form)).await
    }
}

/// Empty bodies decode as JSON `null`.
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_slice(b"null")?);
    }
    Ok(serde_json::from_slice(body)?)
}

/// Degrade a failed secondary data call to an empty value.
///
/// Used for list, word, quiz and statistics fetches whose failure should
/// leave the UI usable rather than blocking it.
pub trait OrEmpty<T> {
    fn or_empty(self, operation: &str) -> T;
}

impl<T: Default> OrEmpty<T> for Result<T, ApiError> {
    fn or_empty(self, operation: &str) -> T {
        self.unwrap_or_else(|e| {
            tracing::warn!("[API] {} failed, continuing with empty result: {}", operation, e);
            T::default()
        })
    }
}
