//! API Error Types
//!
//! Every failure a backend call can produce. Authorization failures get their
//! own variant because the client has already reacted to them (session
//! cleared, navigation requested) by the time the caller sees the error.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::shared::SharedError;

/// Fallback text when neither the backend nor the transport gave a usable message
pub const GENERIC_ERROR: &str = "An unexpected error occurred.";

#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 401; the session has been cleared.
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Any other non-success status, with the backend detail when present.
    #[error("Request failed ({status}): {message}")]
    Status { status: StatusCode, message: String },

    /// Connection, TLS or timeout failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A login response carried neither `access_token` nor `token`.
    #[error("Login response did not include an access token")]
    MissingToken,

    #[error(transparent)]
    Shared(#[from] SharedError),
}

impl ApiError {
    /// Build the error for a failed response from its status and raw body.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let message = extract_detail(body).unwrap_or_else(|| GENERIC_ERROR.to_string());
        if status == StatusCode::UNAUTHORIZED {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Status { status, message }
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Text for an inline error next to a form.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized { message } | ApiError::Status { message, .. } => {
                message.clone()
            }
            ApiError::Shared(e) => e.detail().to_string(),
            ApiError::MissingToken => self.to_string(),
            ApiError::Network(_) | ApiError::Decode(_) => GENERIC_ERROR.to_string(),
        }
    }
}

/// Pull a human readable message out of an error body.
///
/// Order: `detail` (string, or a list of `{msg}` objects), `message`, then
/// the raw text when the body is not JSON.
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let Ok(json) = serde_json::from_slice::<Value>(body) else {
        let text = String::from_utf8_lossy(body).trim().to_string();
        return (!text.is_empty()).then_some(text);
    };
    match json.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => return Some(detail.clone()),
        Some(Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if !messages.is_empty() {
                return Some(messages.join("; "));
            }
        }
        _ => {}
    }
    json.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
