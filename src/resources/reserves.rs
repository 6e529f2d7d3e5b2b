//! Scheduled token reserves
//!
//! A reserve is a token amount scheduled to move at a future time. Amounts
//! are decimal strings end to end; the client never parses them.

use super::Ctx;
use crate::error::Result;
use crate::query::{Ack, ListParams, Page};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cache resource name for reserve list queries
pub const RESOURCE: &str = "get-reserves";

/// A scheduled reserve entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reserve {
    /// Backend-issued id
    pub id: String,
    /// Token symbol (e.g. `MSQ`, `SUT`)
    pub token: String,
    /// Amount as a decimal string
    pub amount: String,
    /// When the reserve executes
    pub scheduled_at: DateTime<Utc>,
    /// `SCHEDULED`, `EXECUTED`, or `CANCELED`
    #[serde(default)]
    pub status: String,
}

/// Create/update payload for a reserve
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservePayload {
    /// Token symbol
    pub token: String,
    /// Amount as a decimal string
    pub amount: String,
    /// Execution time
    pub scheduled_at: DateTime<Utc>,
}

/// Client for the reserve endpoints
pub struct ReservesClient {
    ctx: Ctx,
}

impl ReservesClient {
    pub(crate) fn new(ctx: Ctx) -> Self {
        Self { ctx }
    }

    /// Lists reserves, cached under `get-reserves`
    pub async fn list(&self, params: &ListParams) -> Result<Page<Reserve>> {
        self.ctx
            .list_page(RESOURCE, "/reserves", "reserves", params)
            .await
    }

    /// Schedules a reserve
    pub async fn create(&self, payload: &ReservePayload) -> Result<Reserve> {
        let created = self.ctx.api.post_json("/reserves", payload).await?;
        self.ctx.mutated("add-reserve")?;
        Ok(created)
    }

    /// Updates a still-scheduled reserve
    pub async fn update(&self, id: &str, payload: &ReservePayload) -> Result<Reserve> {
        let updated = self
            .ctx
            .api
            .put_json(&format!("/reserves/{}", id), payload)
            .await?;
        self.ctx.mutated("update-reserve")?;
        Ok(updated)
    }

    /// Cancels a scheduled reserve
    pub async fn cancel(&self, id: &str) -> Result<Ack> {
        let ack = self
            .ctx
            .api
            .post_json(&format!("/reserves/{}/cancel", id), &serde_json::json!({}))
            .await?;
        self.ctx.mutated("cancel-reserve")?;
        Ok(ack)
    }
}
