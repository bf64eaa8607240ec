use serde_json::Value;

use super::{ApiClient, ApiError};
use crate::shared::models::{Word, WordId, WordPayload};

impl ApiClient {
    /// `PUT /words/{id}`
    pub async fn update_word(&self, id: WordId, word: &WordPayload) -> Result<Word, ApiError> {
        word.validate()?;
        self.put_json(&format!("/words/{}", id), word).await
    }

    /// `DELETE /words/{id}`
    pub async fn delete_word(&self, id: WordId) -> Result<(), ApiError> {
        self.delete::<Value>(&format!("/words/{}", id)).await.map(drop)
    }
}
