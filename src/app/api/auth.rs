//! `/auth` endpoints.
//!
//! These return the raw backend body; `SessionStore` turns a login response
//! into a session.

use serde_json::Value;

use super::{ApiClient, ApiError};
use crate::app::types::{LoginRequest, RegisterRequest};

impl ApiClient {
    /// `POST /auth/login` with form-encoded `username`/`password`.
    pub async fn exchange_credentials(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<Value, ApiError> {
        let form = LoginRequest {
            username: identifier.to_string(),
            password: password.to_string(),
        };
        self.post_form("/auth/login", &form).await
    }

    /// `POST /auth/register` with a JSON body.
    pub async fn create_account(&self, request: &RegisterRequest) -> Result<Value, ApiError> {
        self.post_json("/auth/register", request).await
    }
}
