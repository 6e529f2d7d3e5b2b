//! Community records

use super::Ctx;
use crate::error::Result;
use crate::query::{Ack, ListParams, Page};
use serde::{Deserialize, Serialize};

/// Cache resource name for community list queries
pub const RESOURCE: &str = "get-communities";

/// A community registered on a platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    /// Backend-issued id
    pub id: String,
    /// Community display name
    pub name: String,
    /// Owning platform identifier
    #[serde(default)]
    pub platform: String,
    /// External URL (Telegram, Discord, ...)
    #[serde(default)]
    pub url: Option<String>,
    /// Reported member count
    #[serde(default)]
    pub member_count: u64,
    /// Visibility status (`VISIBLE`, `HIDDEN`)
    #[serde(default)]
    pub status: String,
}

/// Create/update payload for a community
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityPayload {
    /// Community display name
    pub name: String,
    /// Owning platform identifier
    pub platform: String,
    /// External URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Client for the community endpoints
pub struct CommunitiesClient {
    ctx: Ctx,
}

impl CommunitiesClient {
    pub(crate) fn new(ctx: Ctx) -> Self {
        Self { ctx }
    }

    /// Lists communities, cached under `get-communities`
    pub async fn list(&self, params: &ListParams) -> Result<Page<Community>> {
        self.ctx
            .list_page(RESOURCE, "/communities", "communities", params)
            .await
    }

    /// Fetches a single community (uncached)
    pub async fn get(&self, id: &str) -> Result<Community> {
        self.ctx
            .api
            .get_json(&format!("/communities/{}", id), &[])
            .await
    }

    /// Registers a community
    pub async fn create(&self, payload: &CommunityPayload) -> Result<Community> {
        let created = self.ctx.api.post_json("/communities", payload).await?;
        self.ctx.mutated("add-community")?;
        Ok(created)
    }

    /// Updates a community record
    pub async fn update(&self, id: &str, payload: &CommunityPayload) -> Result<Community> {
        let updated = self
            .ctx
            .api
            .put_json(&format!("/communities/{}", id), payload)
            .await?;
        self.ctx.mutated("update-community")?;
        Ok(updated)
    }

    /// Removes a community record
    pub async fn delete(&self, id: &str) -> Result<Ack> {
        let ack = self
            .ctx
            .api
            .delete_json(&format!("/communities/{}", id))
            .await?;
        self.ctx.mutated("delete-community")?;
        Ok(ack)
    }
}
