//! On-chain transaction id history
//!
//! Read-only: records are written by the chain watcher on the backend side,
//! so this client exposes no mutations and declares no invalidations.

use super::Ctx;
use crate::error::Result;
use crate::query::{ListParams, Page};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cache resource name for tx-id history list queries
pub const RESOURCE: &str = "get-txid-history";

/// A recorded on-chain transaction reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxIdRecord {
    /// Backend-issued id
    pub id: String,
    /// Transaction hash on chain
    pub tx_hash: String,
    /// Associated user id
    #[serde(default)]
    pub user_id: Option<String>,
    /// Token symbol
    #[serde(default)]
    pub token: String,
    /// Amount as a decimal string
    #[serde(default)]
    pub amount: String,
    /// When the record was written
    pub created_at: DateTime<Utc>,
}

/// Client for the tx-id history endpoints
pub struct TxIdHistoryClient {
    ctx: Ctx,
}

impl TxIdHistoryClient {
    pub(crate) fn new(ctx: Ctx) -> Self {
        Self { ctx }
    }

    /// Lists history records, cached under `get-txid-history`
    pub async fn list(&self, params: &ListParams) -> Result<Page<TxIdRecord>> {
        self.ctx
            .list_page(RESOURCE, "/txid-history", "txIdHistory", params)
            .await
    }

    /// Fetches a single record (uncached)
    pub async fn get(&self, id: &str) -> Result<TxIdRecord> {
        self.ctx
            .api
            .get_json(&format!("/txid-history/{}", id), &[])
            .await
    }
}
