//! Platform news articles
//!
//! News is the exemplar entity: list queries are cached under `get-news`
//! with the full parameter tuple, and every mutation expires that resource
//! through the central invalidation map before returning.

use super::Ctx;
use crate::error::Result;
use crate::query::{Ack, ListParams, Page};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cache resource name for news list queries
pub const RESOURCE: &str = "get-news";

/// A published or draft news article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    /// Backend-issued id
    pub id: String,
    /// Article title
    pub title: String,
    /// Article body (markdown)
    #[serde(default)]
    pub content: String,
    /// Optional external link
    #[serde(default)]
    pub link: Option<String>,
    /// Publication timestamp; `None` for drafts
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// Lifecycle status (`DRAFT`, `PUBLISHED`, `ARCHIVED`)
    #[serde(default)]
    pub status: String,
}

/// Payload for creating an article
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNews {
    /// Article title
    pub title: String,
    /// Article body
    pub content: String,
    /// Optional external link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Partial update payload; unset fields are left untouched server-side
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsUpdate {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// New status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Client for the news endpoints
pub struct NewsClient {
    ctx: Ctx,
}

impl NewsClient {
    pub(crate) fn new(ctx: Ctx) -> Self {
        Self { ctx }
    }

    /// Lists articles, cached under `get-news` + the parameter tuple
    pub async fn list(&self, params: &ListParams) -> Result<Page<News>> {
        self.ctx.list_page(RESOURCE, "/news", "news", params).await
    }

    /// Fetches a single article (uncached)
    pub async fn get(&self, id: &str) -> Result<News> {
        self.ctx.api.get_json(&format!("/news/{}", id), &[]).await
    }

    /// Creates an article and expires cached news lists
    pub async fn create(&self, payload: &NewNews) -> Result<News> {
        let created = self.ctx.api.post_json("/news", payload).await?;
        self.ctx.mutated("add-news")?;
        Ok(created)
    }

    /// Updates an article and expires cached news lists
    pub async fn update(&self, id: &str, payload: &NewsUpdate) -> Result<News> {
        let updated = self
            .ctx
            .api
            .put_json(&format!("/news/{}", id), payload)
            .await?;
        self.ctx.mutated("update-news")?;
        Ok(updated)
    }

    /// Deletes an article and expires cached news lists
    pub async fn delete(&self, id: &str) -> Result<Ack> {
        let ack = self.ctx.api.delete_json(&format!("/news/{}", id)).await?;
        self.ctx.mutated("delete-news")?;
        Ok(ack)
    }
}
