use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{
    multipart::{Form, Part},
    Method,
};
use serde::Deserialize;

use super::ApiClient;
use crate::common::ApiError;
use crate::models::{Block, Page};
use crate::types::{ImageFile, UploadedImage};

/// Remote persistence of pages and page assets.
#[async_trait(?Send)]
pub trait PageStore {
    async fn list(&self, owner_id: &str) -> Result<Vec<Page>, ApiError>;

    /// Persists a new page; the server assigns the id.
    async fn create(&self, page: &Page) -> Result<Page, ApiError>;

    /// Full replace of the page stored under `id`.
    async fn update(&self, id: &str, page: &Page) -> Result<Page, ApiError>;

    async fn delete(&self, id: &str) -> Result<(), ApiError>;

    async fn upload_image(&self, file: &ImageFile) -> Result<UploadedImage, ApiError>;
}

/// Page record as the API returns it. Stored records carry `_id`, which
/// takes precedence over any client-side `id`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageRecord {
    #[serde(rename = "_id", default)]
    object_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(rename = "userId", default)]
    owner_id: String,
    #[serde(default)]
    blocks: Vec<Block>,
    #[serde(default)]
    is_deleted: Option<bool>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl From<PageRecord> for Page {
    fn from(record: PageRecord) -> Self {
        Page {
            id: record.object_id.or(record.id).unwrap_or_default(),
            title: record.title,
            owner_id: record.owner_id,
            blocks: record.blocks,
            is_deleted: record.is_deleted,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

pub struct HttpPageStore {
    client: ApiClient,
}

impl HttpPageStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl PageStore for HttpPageStore {
    async fn list(&self, owner_id: &str) -> Result<Vec<Page>, ApiError> {
        let records: Vec<PageRecord> = self
            .client
            .get_json("/pages", &[("userId", owner_id)])
            .await?;
        Ok(records.into_iter().map(Page::from).collect())
    }

    async fn create(&self, page: &Page) -> Result<Page, ApiError> {
        let record: PageRecord = self.client.post_json("/pages", page).await?;
        Ok(record.into())
    }

    async fn update(&self, id: &str, page: &Page) -> Result<Page, ApiError> {
        let record: PageRecord = self
            .client
            .send_json(Method::PUT, &format!("/pages/{}", id), page)
            .await?;
        Ok(record.into())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/pages/{}", id)).await
    }

    async fn upload_image(&self, file: &ImageFile) -> Result<UploadedImage, ApiError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)?;
        let form = Form::new().part("image", part);
        self.client.post_multipart("/pages/upload", form).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_prefers_object_id() {
        let record: PageRecord = serde_json::from_str(
            r#"{"_id": "665a", "id": "new", "title": "Home", "userId": "u1", "blocks": []}"#,
        )
        .unwrap();
        let page = Page::from(record);
        assert_eq!(page.id, "665a");
        assert_eq!(page.owner_id, "u1");
    }

    #[test]
    fn record_falls_back_to_plain_id() {
        let record: PageRecord =
            serde_json::from_str(r#"{"id": "p7", "title": "About"}"#).unwrap();
        assert_eq!(Page::from(record).id, "p7");
    }
}
