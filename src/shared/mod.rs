//! Shared Module
//!
//! This module contains types and data structures that do not depend on the
//! client runtime: error types, the configuration file layer and the
//! vocabulary models exchanged with the backend.
//!
//! # Overview
//!
//! All types here are plain data and are designed for serialization and
//! transmission over HTTP.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Word lists, words, OCR items, quiz answers and statistics
pub mod models;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::SharedError;
pub use models::{
    Difficulty, ListId, ListPayload, Listing, OcrItem, QuizAnswer, QuizMode, UserStats, Word,
    WordId, WordList, WordPayload,
};
