//! Bearer token inspection
//!
//! Tokens are opaque to this client. When a token happens to be a JWT its
//! payload is decoded (without signature verification) to read the expiry
//! and identity claims; anything that fails to decode is simply treated as
//! carrying no claims.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::app::types::{UserId, UserInfo};

/// Claims this client knows how to read from a token payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<Value>,
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Expiration time (Unix timestamp, seconds)
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| Utc.timestamp_opt(exp, 0).single())
    }

    /// Identity described by the claims, if they name a subject.
    pub fn user(&self) -> Option<UserInfo> {
        let id = [&self.user_id, &self.id, &self.sub]
            .into_iter()
            .flatten()
            .find_map(UserId::from_value)?;
        let mut user = UserInfo::new(id);
        user.username = self.username.clone();
        user.email = self.email.clone();
        // `sub` commonly carries the login email rather than a numeric id
        if user.email.is_none() {
            if let Some(Value::String(sub)) = &self.sub {
                if sub.contains('@') {
                    user.email = Some(sub.clone());
                }
            }
        }
        Some(user)
    }
}

/// Decode the payload segment of a JWT-shaped token.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let mut segments = token.split('.');
    let (_header, payload, _signature) = (segments.next()?, segments.next()?, segments.next()?);
    if segments.next().is_some() {
        return None;
    }
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// True when the token carries an `exp` claim at or before `now`.
pub fn is_expired_at(token: &str, now: DateTime<Utc>) -> bool {
    decode_claims(token)
        .and_then(|claims| claims.expires_at())
        .is_some_and(|expires| expires <= now)
}

pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, Utc::now())
}
