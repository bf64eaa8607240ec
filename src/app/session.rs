//! Session Store
//!
//! Single source of truth for who is logged in. The session is held in
//! memory and mirrored to a `SessionStorage` under the `token` and `user`
//! keys so that a restart does not force re-authentication.
//!
//! # Lifecycle
//!
//! 1. `SessionStore::new` starts in the *loading* state with no session.
//! 2. `initialize` rehydrates from storage, purging anything that is
//!    inconsistent, corrupt or expired, and marks the store *ready*.
//! 3. `login` / `register` establish a session from a backend response.
//! 4. `logout` (directly, or via the API client on a 401) destroys it.
//!
//! # Invariants
//!
//! - A user is never held without a non-empty token.
//! - `is_authenticated()` is true iff a token is held.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::app::api::{ApiClient, ApiError};
use crate::app::storage::{SessionStorage, TOKEN_KEY, USER_KEY};
use crate::app::token;
use crate::app::types::{AuthGrant, RegisterRequest, UserInfo};
use crate::shared::error::SharedError;

/// Snapshot of the current session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserInfo>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Owns the authentication token and current user
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    state: RwLock<Session>,
    ready: AtomicBool,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .field("ready", &self.is_ready())
            .finish()
    }
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            storage,
            state: RwLock::new(Session::default()),
            ready: AtomicBool::new(false),
        }
    }

    /// Restore the persisted session. Never fails; anything unusable in
    /// storage is purged and the store comes up logged out.
    pub fn initialize(&self) -> Session {
        let restored = self.restore();
        match &restored {
            Some(session) => {
                tracing::info!(
                    "[SESSION] Restored session for {}",
                    session
                        .user
                        .as_ref()
                        .map(UserInfo::display_name)
                        .unwrap_or_default()
                );
            }
            None => tracing::debug!("[SESSION] No persisted session"),
        }
        let session = restored.unwrap_or_default();
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = session.clone();
        self.ready.store(true, Ordering::Release);
        session
    }

    fn restore(&self) -> Option<Session> {
        let token = self.storage.get(TOKEN_KEY).filter(|t| !t.trim().is_empty());
        let stored_user = self.storage.get(USER_KEY);

        let Some(token) = token else {
            if stored_user.is_some() {
                tracing::warn!("[SESSION] Found user record without token, purging");
                self.purge();
            }
            return None;
        };

        if token::is_expired(&token) {
            tracing::info!("[SESSION] Persisted token has expired, purging");
            self.purge();
            return None;
        }

        let user = match stored_user {
            Some(raw) => match serde_json::from_str::<UserInfo>(&raw) {
                Ok(user) => user,
                Err(e) => {
                    tracing::warn!("[SESSION] Corrupt persisted user record ({}), purging", e);
                    self.purge();
                    return None;
                }
            },
            None => match token::decode_claims(&token).and_then(|claims| claims.user()) {
                Some(user) => user,
                None => {
                    tracing::warn!("[SESSION] Found token without user record, purging");
                    self.purge();
                    return None;
                }
            },
        };

        Some(Session {
            token: Some(token),
            user: Some(user),
        })
    }

    /// Log in with the backend and persist the resulting session.
    ///
    /// Backend errors are returned unchanged so the caller can show them.
    pub async fn login(
        &self,
        api: &ApiClient,
        identifier: &str,
        password: &str,
    ) -> Result<Session, ApiError> {
        let response = api.exchange_credentials(identifier, password).await?;
        let grant =
            AuthGrant::from_response(&response, identifier).ok_or(ApiError::MissingToken)?;
        let session = self.establish(grant)?;
        tracing::info!("[SESSION] Logged in as {}", identifier);
        Ok(session)
    }

    /// Create an account, then log in with the same email and password.
    ///
    /// On success the store is always authenticated.
    pub async fn register(
        &self,
        api: &ApiClient,
        request: &RegisterRequest,
    ) -> Result<Session, ApiError> {
        api.create_account(request).await?;
        tracing::info!("[SESSION] Registered {}", request.email);
        self.login(api, &request.email, &request.password).await
    }

    /// Persist and adopt a grant as the current session.
    pub fn establish(&self, grant: AuthGrant) -> Result<Session, SharedError> {
        let user_json = serde_json::to_string(&grant.user)?;
        self.storage.set(TOKEN_KEY, &grant.token)?;
        if let Err(e) = self.storage.set(USER_KEY, &user_json) {
            tracing::error!("[SESSION] Failed to persist user record: {}", e);
            // no token without its user, in storage or in memory
            self.logout();
            return Err(e);
        }
        let session = Session {
            token: Some(grant.token),
            user: Some(grant.user),
        };
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = session.clone();
        self.ready.store(true, Ordering::Release);
        Ok(session)
    }

    /// Clear storage and memory. Calling it while logged out is a no-op.
    pub fn logout(&self) {
        self.purge();
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.is_authenticated() {
            tracing::info!("[SESSION] Logged out");
        }
        *state = Session::default();
    }

    fn purge(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                tracing::error!("[SESSION] Failed to remove '{}' from storage: {}", key, e);
            }
        }
    }

    /// Current token, user and authenticated flag. No network access.
    pub fn current_session(&self) -> Session {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .token
            .clone()
            .filter(|t| !t.is_empty())
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.current_session().user
    }

    pub fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_authenticated()
    }

    /// False until `initialize` (or a login) has completed.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}
