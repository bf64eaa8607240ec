use serde_json::Value;

use super::{ApiClient, ApiError};
use crate::shared::models::{ListId, UserStats, WordId};

impl ApiClient {
    /// `GET /stats/me`
    pub async fn user_stats(&self) -> Result<UserStats, ApiError> {
        let stats: Option<UserStats> = self.get("/stats/me").await?;
        Ok(stats.unwrap_or_default())
    }

    /// `GET /stats/word/{id}`
    pub async fn word_stats(&self, id: WordId) -> Result<Value, ApiError> {
        self.get(&format!("/stats/word/{}", id)).await
    }

    /// `GET /stats/list/{id}`
    pub async fn list_stats(&self, id: ListId) -> Result<Value, ApiError> {
        self.get(&format!("/stats/list/{}", id)).await
    }
}
