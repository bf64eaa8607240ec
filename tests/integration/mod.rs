//! Integration tests
//!
//! The client stack against a mock backend: session lifecycle, central 401
//! handling, endpoint contracts, file persistence and the composition root.

mod app_state_test;
mod session_test;
