use serde_json::Value;

use super::{ApiClient, ApiError};
use crate::shared::models::{ListId, ListPayload, Listing, NewWord, Word, WordList, WordPayload};

impl ApiClient {
    /// `GET /wordlists`
    pub async fn word_lists(&self) -> Result<Vec<WordList>, ApiError> {
        let listing: Option<Listing<WordList>> = self.get("/wordlists").await?;
        Ok(listing.map(Listing::into_vec).unwrap_or_default())
    }

    /// `POST /wordlists/`
    pub async fn create_word_list(&self, payload: &ListPayload) -> Result<WordList, ApiError> {
        payload.validate()?;
        self.post_json("/wordlists/", payload).await
    }

    /// `PUT /wordlists/{id}`
    pub async fn update_word_list(
        &self,
        id: ListId,
        payload: &ListPayload,
    ) -> Result<WordList, ApiError> {
        payload.validate()?;
        self.put_json(&format!("/wordlists/{}", id), payload).await
    }

    /// `DELETE /wordlists/{id}`; the backend removes the list's words too.
    pub async fn delete_word_list(&self, id: ListId) -> Result<(), ApiError> {
        self.delete::<Value>(&format!("/wordlists/{}", id))
            .await
            .map(drop)
    }

    /// `GET /words/list/{id}`
    pub async fn list_words(&self, list_id: ListId) -> Result<Vec<Word>, ApiError> {
        let listing: Option<Listing<Word>> = self.get(&format!("/words/list/{}", list_id)).await?;
        Ok(listing.map(Listing::into_vec).unwrap_or_default())
    }

    /// `POST /words/` with the list id merged into the word body.
    pub async fn add_word(&self, list_id: ListId, word: &WordPayload) -> Result<Word, ApiError> {
        word.validate()?;
        self.post_json("/words/", &NewWord { list_id, word }).await
    }
}
