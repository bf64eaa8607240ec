//! Vocabulary data models
//!
//! Word lists, words, OCR extraction items, quiz submissions and statistics as
//! exchanged with the backend. Response types keep any field they do not
//! name in `extra`, so payloads pass through this layer unexamined.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::shared::error::SharedError;

/// Backend identifier of a word list
pub type ListId = i64;

/// Backend identifier of a word
pub type WordId = i64;

/// A collection endpoint body: either a bare array or `{ "items": [...] }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Plain(Vec<T>),
    Wrapped { items: Vec<T> },
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Plain(items) | Listing::Wrapped { items } => items,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// Accepts `"x"`, `["x", "y"]` or `null` and yields a list.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(s)) if s.trim().is_empty() => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
    })
}

/// Treats an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A named word list owned by the current user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordList {
    pub id: ListId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub word_count: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for creating or renaming a word list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ListPayload {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> Result<(), SharedError> {
        if self.name.trim().is_empty() {
            return Err(SharedError::validation("name", "List name is required"));
        }
        Ok(())
    }
}

/// A vocabulary entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<ListId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kobun_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub english_translation: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub readings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for creating or editing a word
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WordPayload {
    pub kobun_text: String,
    pub english_translation: String,
    pub readings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<String>,
}

impl WordPayload {
    pub fn new(kobun_text: impl Into<String>, english_translation: impl Into<String>) -> Self {
        Self {
            kobun_text: kobun_text.into().trim().to_string(),
            english_translation: english_translation.into().trim().to_string(),
            readings: Vec::new(),
            examples: None,
        }
    }

    pub fn with_readings(mut self, readings: Vec<String>) -> Self {
        self.readings = readings;
        self
    }

    pub fn with_examples(mut self, examples: impl Into<String>) -> Self {
        let examples = examples.into().trim().to_string();
        self.examples = (!examples.is_empty()).then_some(examples);
        self
    }

    /// Split a comma separated readings field, dropping blanks.
    pub fn parse_readings(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn validate(&self) -> Result<(), SharedError> {
        if self.kobun_text.trim().is_empty() {
            return Err(SharedError::validation("kobun_text", "Word text is required"));
        }
        Ok(())
    }
}

/// `POST /words/` body: the word payload plus its owning list.
#[derive(Debug, Clone, Serialize)]
pub struct NewWord<'a> {
    pub list_id: ListId,
    #[serde(flatten)]
    pub word: &'a WordPayload,
}

/// One vocabulary candidate recognised in an uploaded image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub translation: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub readings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OcrItem {
    /// Convert an extracted item into the body used to add it to a list.
    pub fn to_word_payload(&self) -> WordPayload {
        let text = self.word.as_deref().or(self.term.as_deref()).unwrap_or("");
        let translation = self
            .translation
            .first()
            .map(String::as_str)
            .or(self.definition.as_deref())
            .unwrap_or("");
        WordPayload::new(text, translation).with_readings(self.readings.clone())
    }
}

/// Quiz presentation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuizMode {
    #[serde(rename = "flashcards")]
    Flashcards,
    #[serde(rename = "mc")]
    MultipleChoice,
    #[serde(rename = "typing")]
    Typing,
}

impl QuizMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizMode::Flashcards => "flashcards",
            QuizMode::MultipleChoice => "mc",
            QuizMode::Typing => "typing",
        }
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuizMode {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flashcards" => Ok(QuizMode::Flashcards),
            "mc" | "multiple-choice" => Ok(QuizMode::MultipleChoice),
            "typing" => Ok(QuizMode::Typing),
            other => Err(SharedError::validation(
                "mode",
                format!("Unknown quiz mode '{other}'"),
            )),
        }
    }
}

/// Self-reported difficulty attached to a quiz answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Hard,
}

/// `POST /quiz/answer` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizAnswer {
    pub word_id: WordId,
    pub correct: bool,
    pub mode: QuizMode,
    pub difficulty: Difficulty,
}

impl QuizAnswer {
    pub fn new(word_id: WordId, correct: bool, mode: QuizMode) -> Self {
        Self {
            word_id,
            correct,
            mode,
            difficulty: if correct {
                Difficulty::Easy
            } else {
                Difficulty::Hard
            },
        }
    }
}

/// Headline counters of the statistics dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatTotals {
    pub lists: Option<u64>,
    pub words: Option<u64>,
    pub due_today: Option<u64>,
    pub reviews: Option<u64>,
}

/// Learning progress series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    #[serde(deserialize_with = "null_as_default")]
    pub labels: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub data: Vec<f64>,
}

/// `GET /stats/me` body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub totals: StatTotals,
    #[serde(default, deserialize_with = "null_as_default")]
    pub progress: Progress,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
