//! Authentication form state and validation
//!
//! Client-side checks run before any request is made; the backend stays the
//! authority on credentials.

use crate::shared::error::SharedError;

/// Authentication form state
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub error: Option<String>,
    pub loading: bool,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }
}

pub fn validate_login(identifier: &str, password: &str) -> Result<(), SharedError> {
    if identifier.trim().is_empty() || password.is_empty() {
        return Err(SharedError::validation(
            "email",
            "Email and password are required",
        ));
    }
    Ok(())
}

pub fn validate_signup(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), SharedError> {
    if username.trim().is_empty() {
        return Err(SharedError::validation("username", "Username is required"));
    }
    if email.trim().is_empty() || password.is_empty() {
        return Err(SharedError::validation(
            "email",
            "Email and password are required",
        ));
    }
    // Simple email validation
    if !email.contains('@') || !email.contains('.') {
        return Err(SharedError::validation(
            "email",
            "Please enter a valid email address",
        ));
    }
    if password != confirm_password {
        return Err(SharedError::validation(
            "confirm_password",
            "Passwords do not match",
        ));
    }
    Ok(())
}
