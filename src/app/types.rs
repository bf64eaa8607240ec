//! Shared Types Module
//!
//! Defines the client-side types: app views, user identity, auth request
//! bodies and the normalized result of a login.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::app::token;

/// Current app view/route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppView {
    /// Login/register screen, the authentication entry point
    #[default]
    Auth,
    /// Word lists and their words
    Lists,
    /// Quiz runner
    Quiz,
    /// Image vocabulary extraction
    Ocr,
    /// Statistics dashboard
    Stats,
}

impl AppView {
    pub fn path(&self) -> &'static str {
        match self {
            AppView::Auth => "/auth",
            AppView::Lists => "/lists",
            AppView::Quiz => "/quiz",
            AppView::Ocr => "/ocr",
            AppView::Stats => "/stats",
        }
    }

    /// Views other than `Auth` require a session.
    pub fn requires_session(&self) -> bool {
        !matches!(self, AppView::Auth)
    }
}

/// Backend subject identifier; numeric or string depending on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl UserId {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(UserId::Number),
            Value::String(s) if !s.is_empty() => Some(UserId::Text(s.clone())),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        match self {
            UserId::Number(n) => Value::from(n),
            UserId::Text(s) => Value::String(s),
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

/// User information, mirroring whatever the backend returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserInfo {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            username: None,
            email: None,
            full_name: None,
            extra: Map::new(),
        }
    }

    /// Minimal identity when the backend told us nothing but a token.
    pub fn from_identifier(identifier: &str) -> Self {
        let mut user = Self::new(UserId::Text(identifier.to_string()));
        if identifier.contains('@') {
            user.email = Some(identifier.to_string());
        } else {
            user.username = Some(identifier.to_string());
        }
        user
    }

    pub fn display_name(&self) -> String {
        self.username
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| self.id.to_string())
    }
}

/// `POST /auth/login` form body
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// `POST /auth/register` JSON body
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
}

impl RegisterRequest {
    /// `full_name` defaults to the username.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let username = username.into();
        Self {
            full_name: username.clone(),
            username,
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("full_name", &self.full_name)
            .finish()
    }
}

/// Response fields that carry the credential, in lookup order.
const TOKEN_FIELDS: [&str; 2] = ["access_token", "token"];

/// Response fields that are never part of the user record.
const NON_USER_FIELDS: [&str; 5] = ["access_token", "token", "token_type", "expires_in", "user"];

/// Token and identity extracted from a login response
#[derive(Clone, PartialEq)]
pub struct AuthGrant {
    pub token: String,
    pub user: UserInfo,
}

impl fmt::Debug for AuthGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthGrant")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

impl AuthGrant {
    /// Normalize a login response body.
    ///
    /// The token is read from `access_token`, then `token`, then the body
    /// itself when it is a bare string. Returns `None` when no non-empty
    /// token is present.
    pub fn from_response(body: &Value, identifier: &str) -> Option<Self> {
        let token = extract_token(body)?;
        let user = extract_user(body, &token, identifier);
        Some(Self { token, user })
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn extract_token(body: &Value) -> Option<String> {
    match body {
        Value::String(s) => non_empty(s),
        Value::Object(map) => TOKEN_FIELDS
            .iter()
            .find_map(|field| map.get(*field).and_then(Value::as_str).and_then(non_empty)),
        _ => None,
    }
}

fn extract_user(body: &Value, token: &str, identifier: &str) -> UserInfo {
    let claimed = token::decode_claims(token).and_then(|claims| claims.user());
    if let Some(Value::Object(record)) = body.get("user") {
        let mut record = record.clone();
        // Keep the backend's record even when it omits the id
        if record.get("id").and_then(UserId::from_value).is_none() {
            let id = claimed
                .as_ref()
                .map(|user| user.id.clone())
                .unwrap_or_else(|| UserId::Text(identifier.to_string()));
            record.insert("id".to_string(), id.into_value());
        }
        match serde_json::from_value::<UserInfo>(Value::Object(record)) {
            Ok(user) => return user,
            Err(e) => tracing::warn!("[SESSION] Ignoring unreadable user record: {}", e),
        }
    }
    if let Some(user) = claimed {
        return user;
    }
    if let Value::Object(map) = body {
        let mut echo = map.clone();
        for field in NON_USER_FIELDS {
            echo.remove(field);
        }
        if let Ok(user) = serde_json::from_value::<UserInfo>(Value::Object(echo)) {
            return user;
        }
    }
    UserInfo::from_identifier(identifier)
}
