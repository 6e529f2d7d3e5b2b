//! Operator-initiated bulk transfers
//!
//! A bulk transfer batches many address/amount pairs into one submission.
//! Submitting one also surfaces new pending deposit requests, which is why
//! its invalidation entry covers both lists.

use super::Ctx;
use crate::error::Result;
use crate::query::{ListParams, Page};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cache resource name for bulk transfer list queries
pub const RESOURCE: &str = "get-bulk-transfers";

/// A submitted bulk transfer batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkTransfer {
    /// Backend-issued batch id
    pub id: String,
    /// Operator account that submitted the batch
    pub requested_by: String,
    /// Token symbol
    pub token: String,
    /// Sum of all items, as a decimal string
    pub total_amount: String,
    /// Number of items in the batch
    pub count: u32,
    /// `SUBMITTED`, `PROCESSING`, `DONE`, or `FAILED`
    #[serde(default)]
    pub status: String,
    /// Submission timestamp
    pub created_at: DateTime<Utc>,
}

/// One address/amount pair within a batch
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferItem {
    /// Destination address
    pub address: String,
    /// Amount as a decimal string
    pub amount: String,
}

/// Submission payload for a new batch
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBulkTransfer {
    /// Token symbol
    pub token: String,
    /// The address/amount pairs to transfer
    pub transfers: Vec<TransferItem>,
}

/// Client for the bulk transfer endpoints
pub struct BulkTransfersClient {
    ctx: Ctx,
}

impl BulkTransfersClient {
    pub(crate) fn new(ctx: Ctx) -> Self {
        Self { ctx }
    }

    /// Lists submitted batches, cached under `get-bulk-transfers`
    pub async fn list(&self, params: &ListParams) -> Result<Page<BulkTransfer>> {
        self.ctx
            .list_page(RESOURCE, "/bulk-transfers", "bulkTransfers", params)
            .await
    }

    /// Fetches a single batch (uncached)
    pub async fn get(&self, id: &str) -> Result<BulkTransfer> {
        self.ctx
            .api
            .get_json(&format!("/bulk-transfers/{}", id), &[])
            .await
    }

    /// Submits a batch; expires both the batch list and deposit requests
    pub async fn create(&self, payload: &NewBulkTransfer) -> Result<BulkTransfer> {
        let created = self.ctx.api.post_json("/bulk-transfers", payload).await?;
        self.ctx.mutated("add-bulk-transfer")?;
        Ok(created)
    }
}
