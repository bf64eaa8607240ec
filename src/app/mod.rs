//! Vocabulary client
//!
//! Session handling and the authenticated backend client, plus the state a
//! front end drives: auth forms, navigation and the quiz runner.

pub mod api;
pub mod auth;
pub mod config;
pub mod logging;
pub mod navigation;
pub mod quiz;
pub mod session;
pub mod state;
pub mod storage;
pub mod token;
pub mod types;

pub use api::{ApiClient, ApiError, OrEmpty, UnauthorizedHandler, GENERIC_ERROR};
pub use auth::AuthState;
pub use config::Config;
pub use logging::init_tracing;
pub use navigation::Navigator;
pub use quiz::QuizRunner;
pub use session::{Session, SessionStore};
pub use state::AppState;
pub use storage::{FileStorage, MemoryStorage, SessionStorage, TOKEN_KEY, USER_KEY};
pub use types::{AppView, AuthGrant, LoginRequest, RegisterRequest, UserId, UserInfo};
