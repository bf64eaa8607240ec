//! `/quiz` endpoints. Review scheduling happens server-side; the sets and
//! counts returned here are passed through as-is.

use serde_json::Value;

use super::{ApiClient, ApiError};
use crate::shared::models::QuizAnswer;

impl ApiClient {
    /// `POST /quiz/answer`
    pub async fn submit_quiz_answer(&self, answer: &QuizAnswer) -> Result<Value, ApiError> {
        self.post_json("/quiz/answer", answer).await
    }

    /// `GET /quiz/flashcard`
    pub async fn flashcard_set(&self) -> Result<Value, ApiError> {
        self.get("/quiz/flashcard").await
    }

    /// `GET /quiz/multiple-choice`
    pub async fn multiple_choice_set(&self) -> Result<Value, ApiError> {
        self.get("/quiz/multiple-choice").await
    }

    /// `GET /quiz/typing`
    pub async fn typing_set(&self) -> Result<Value, ApiError> {
        self.get("/quiz/typing").await
    }

    /// `GET /quiz/due-count`
    pub async fn due_count(&self) -> Result<Value, ApiError> {
        self.get("/quiz/due-count").await
    }
}
