//! `/ocr` endpoints: multipart image upload, vocabulary back.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde_json::Value;

use super::{ApiClient, ApiError};
use crate::shared::error::SharedError;
use crate::shared::models::{ListId, Listing, OcrItem};

/// Multipart field name the backend reads the image from
const FILE_FIELD: &str = "file";

fn mime_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

fn image_form(file_name: &str, bytes: Vec<u8>) -> Result<Form, ApiError> {
    let part = Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(mime_for(file_name))?;
    Ok(Form::new().part(FILE_FIELD, part))
}

impl ApiClient {
    /// `POST /ocr/extract`
    pub async fn extract_vocabulary(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Vec<OcrItem>, ApiError> {
        let form = image_form(file_name, bytes)?;
        let listing: Option<Listing<OcrItem>> = self.post_multipart("/ocr/extract", form).await?;
        Ok(listing.map(Listing::into_vec).unwrap_or_default())
    }

    /// Read an image from disk and run `extract_vocabulary` on it.
    pub async fn extract_vocabulary_from_path(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Vec<OcrItem>, ApiError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(SharedError::from)?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload");
        self.extract_vocabulary(file_name, bytes).await
    }

    /// `POST /ocr/extract-and-add/{list_id}`: extract and append in one call.
    pub async fn extract_and_add(
        &self,
        list_id: ListId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Value, ApiError> {
        let form = image_form(file_name, bytes)?;
        self.post_multipart(&format!("/ocr/extract-and-add/{}", list_id), form)
            .await
    }
}
