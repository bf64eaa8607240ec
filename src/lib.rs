//! Kobun Vocab - Client Library
//!
//! Client side of a classical Japanese (kobun) vocabulary trainer: session
//! persistence, an authenticated HTTP client for the vocabulary backend, and
//! the state a front end drives (auth forms, navigation, quizzes).
//!
//! # Module Structure
//!
//! - **`shared`** - Types that do not depend on the client runtime
//!   - Word lists, words, OCR items, quiz answers, statistics
//!   - Configuration file layer
//!   - Error types
//!
//! - **`app`** - The client (native targets only)
//!   - `SessionStore`: token and user lifecycle, persisted under the keys
//!     `token` and `user`
//!   - `ApiClient`: every backend call, with bearer credentials attached and
//!     a central 401 handler that logs out and returns to the auth view
//!   - `AppState`: composition root wiring the two together
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use kobun_vocab::app::{AppState, Config, MemoryStorage};
//!
//! # fn example() -> Result<(), kobun_vocab::app::ApiError> {
//! let mut state = AppState::new(Config::new(), Arc::new(MemoryStorage::new()))?;
//! let session = state.start();
//! if !session.is_authenticated() {
//!     state.email_input = "user@example.com".into();
//!     state.password_input = "secret".into();
//!     state.handle_login();
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! `SessionStore` is shared as `Arc<SessionStore>` and guards its state with
//! an `RwLock`; `ApiClient` is cheap to clone and safe to use from any task.

/// Shared types and data structures
pub mod shared;

/// Session store, API client and application state
#[cfg(not(target_arch = "wasm32"))]
pub mod app;
