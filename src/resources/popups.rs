//! In-app pop-up banners

use super::Ctx;
use crate::error::Result;
use crate::query::{Ack, ListParams, Page};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cache resource name for pop-up list queries
pub const RESOURCE: &str = "get-popups";

/// A pop-up banner shown in the app during its display window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Popup {
    /// Backend-issued id
    pub id: String,
    /// Banner title
    pub title: String,
    /// Banner image URL
    #[serde(default)]
    pub image_url: Option<String>,
    /// Display window start
    pub starts_at: DateTime<Utc>,
    /// Display window end
    pub ends_at: DateTime<Utc>,
    /// Whether the banner is currently enabled
    #[serde(default)]
    pub active: bool,
}

/// Create/update payload for a pop-up
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupPayload {
    /// Banner title
    pub title: String,
    /// Banner image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Display window start
    pub starts_at: DateTime<Utc>,
    /// Display window end
    pub ends_at: DateTime<Utc>,
}

/// Client for the pop-up endpoints
pub struct PopupsClient {
    ctx: Ctx,
}

impl PopupsClient {
    pub(crate) fn new(ctx: Ctx) -> Self {
        Self { ctx }
    }

    /// Lists pop-ups, cached under `get-popups`
    pub async fn list(&self, params: &ListParams) -> Result<Page<Popup>> {
        self.ctx
            .list_page(RESOURCE, "/popups", "popups", params)
            .await
    }

    /// Creates a pop-up
    pub async fn create(&self, payload: &PopupPayload) -> Result<Popup> {
        let created = self.ctx.api.post_json("/popups", payload).await?;
        self.ctx.mutated("add-popup")?;
        Ok(created)
    }

    /// Updates a pop-up
    pub async fn update(&self, id: &str, payload: &PopupPayload) -> Result<Popup> {
        let updated = self
            .ctx
            .api
            .put_json(&format!("/popups/{}", id), payload)
            .await?;
        self.ctx.mutated("update-popup")?;
        Ok(updated)
    }

    /// Deletes a pop-up
    pub async fn delete(&self, id: &str) -> Result<Ack> {
        let ack = self.ctx.api.delete_json(&format!("/popups/{}", id)).await?;
        self.ctx.mutated("delete-popup")?;
        Ok(ack)
    }
}
