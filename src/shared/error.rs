//! Shared Error Types
//!
//! This module defines error types that are shared between the session layer,
//! the API client and the data models. These errors represent local failure
//! cases that do not originate from the backend.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - Form and payload validation failures
//! - `StorageError` - Durable session storage failures
//!
//! # Usage
//!
//! ```rust
//! use kobun_vocab::shared::error::SharedError;
//!
//! // Create a validation error
//! let error = SharedError::validation("name", "List name cannot be empty");
//! ```
//!
//! # Thread Safety
//!
//! All error types are `Send + Sync` and can be safely shared across thread boundaries.
use thiserror::Error;

/// Shared error types for local (non-network) failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Durable storage error
    #[error("Storage error: {message}")]
    StorageError {
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageError {
            message: message.into(),
        }
    }

    /// The message without the category prefix, suitable for inline form errors.
    pub fn detail(&self) -> &str {
        match self {
            Self::SerializationError { message }
            | Self::ValidationError { message, .. }
            | Self::StorageError { message } => message,
        }
    }
}

/// Helper trait for converting serialization errors
impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for SharedError {
    fn from(err: std::io::Error) -> Self {
        Self::storage(format!("I/O error: {}", err))
    }
}
