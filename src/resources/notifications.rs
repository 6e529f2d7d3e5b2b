//! Operator-sent notifications

use super::Ctx;
use crate::error::Result;
use crate::query::{Ack, ListParams, Page};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cache resource name for notification list queries
pub const RESOURCE: &str = "get-notifications";

/// A notification pushed to app users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Backend-issued id
    pub id: String,
    /// Notification title
    pub title: String,
    /// Notification body
    #[serde(default)]
    pub body: String,
    /// Target audience (`ALL`, a platform id, or a user segment)
    #[serde(default)]
    pub audience: String,
    /// When the notification went out; `None` while scheduled
    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,
}

/// Create/update payload for a notification
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    /// Notification title
    pub title: String,
    /// Notification body
    pub body: String,
    /// Target audience
    pub audience: String,
}

/// Client for the notification endpoints
pub struct NotificationsClient {
    ctx: Ctx,
}

impl NotificationsClient {
    pub(crate) fn new(ctx: Ctx) -> Self {
        Self { ctx }
    }

    /// Lists notifications, cached under `get-notifications`
    pub async fn list(&self, params: &ListParams) -> Result<Page<Notification>> {
        self.ctx
            .list_page(RESOURCE, "/notifications", "notifications", params)
            .await
    }

    /// Creates (and schedules) a notification
    pub async fn create(&self, payload: &NotificationPayload) -> Result<Notification> {
        let created = self.ctx.api.post_json("/notifications", payload).await?;
        self.ctx.mutated("add-notification")?;
        Ok(created)
    }

    /// Updates a not-yet-sent notification
    pub async fn update(&self, id: &str, payload: &NotificationPayload) -> Result<Notification> {
        let updated = self
            .ctx
            .api
            .put_json(&format!("/notifications/{}", id), payload)
            .await?;
        self.ctx.mutated("update-notification")?;
        Ok(updated)
    }

    /// Deletes a notification
    pub async fn delete(&self, id: &str) -> Result<Ack> {
        let ack = self
            .ctx
            .api
            .delete_json(&format!("/notifications/{}", id))
            .await?;
        self.ctx.mutated("delete-notification")?;
        Ok(ack)
    }
}
