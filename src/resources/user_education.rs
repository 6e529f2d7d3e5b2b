//! User education course completions

use super::Ctx;
use crate::error::Result;
use crate::query::{Ack, ListParams, Page};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cache resource name for user education list queries
pub const RESOURCE: &str = "get-user-education";

/// A user's completion record for an education course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEducation {
    /// Backend-issued id
    pub id: String,
    /// User who completed the course
    pub user_id: String,
    /// Course identifier
    pub course: String,
    /// Completion timestamp
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Payload recording a completion on a user's behalf
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEducationPayload {
    /// User id
    pub user_id: String,
    /// Course identifier
    pub course: String,
}

/// Client for the user education endpoints
pub struct UserEducationClient {
    ctx: Ctx,
}

impl UserEducationClient {
    pub(crate) fn new(ctx: Ctx) -> Self {
        Self { ctx }
    }

    /// Lists completion records, cached under `get-user-education`
    pub async fn list(&self, params: &ListParams) -> Result<Page<UserEducation>> {
        self.ctx
            .list_page(RESOURCE, "/user-education", "userEducation", params)
            .await
    }

    /// Records a completion manually
    pub async fn create(&self, payload: &UserEducationPayload) -> Result<UserEducation> {
        let created = self.ctx.api.post_json("/user-education", payload).await?;
        self.ctx.mutated("add-user-education")?;
        Ok(created)
    }

    /// Removes a completion record
    pub async fn delete(&self, id: &str) -> Result<Ack> {
        let ack = self
            .ctx
            .api
            .delete_json(&format!("/user-education/{}", id))
            .await?;
        self.ctx.mutated("delete-user-education")?;
        Ok(ack)
    }
}
