//! Deposit requests awaiting review
//!
//! Deposits carry the one batch mutation in the system: approve/reject take
//! a list of request ids, and either way the `deposit-requests` cache goes
//! stale so the review queue refetches.

use super::Ctx;
use crate::error::Result;
use crate::query::{Ack, ListParams, Page};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cache resource name for deposit request list queries
pub const RESOURCE: &str = "deposit-requests";

/// A user deposit request pending operator review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
    /// Backend-issued request id
    pub id: String,
    /// Requesting user id
    pub user_id: String,
    /// Token symbol
    pub token: String,
    /// Amount as a decimal string
    pub amount: String,
    /// `PENDING`, `APPROVED`, or `REJECTED`
    #[serde(default)]
    pub status: String,
    /// When the user filed the request
    pub requested_at: DateTime<Utc>,
}

/// Id-list payload shared by the approve and reject mutations
#[derive(Debug, Clone, Serialize)]
pub struct ReviewRequest {
    /// Ids of the requests under review
    pub request_ids: Vec<String>,
}

/// Client for the deposit request endpoints
pub struct DepositsClient {
    ctx: Ctx,
}

impl DepositsClient {
    pub(crate) fn new(ctx: Ctx) -> Self {
        Self { ctx }
    }

    /// Lists deposit requests, cached under `deposit-requests`
    pub async fn list(&self, params: &ListParams) -> Result<Page<DepositRequest>> {
        self.ctx
            .list_page(RESOURCE, "/deposits/requests", "depositRequests", params)
            .await
    }

    /// Approves the given requests; expires `deposit-requests` on success
    pub async fn approve(&self, request_ids: Vec<String>) -> Result<Ack> {
        let ack = self
            .ctx
            .api
            .post_json("/deposits/requests/approve", &ReviewRequest { request_ids })
            .await?;
        self.ctx.mutated("approve-deposit")?;
        Ok(ack)
    }

    /// Rejects the given requests; expires `deposit-requests` on success
    pub async fn reject(&self, request_ids: Vec<String>) -> Result<Ack> {
        let ack = self
            .ctx
            .api
            .post_json("/deposits/requests/reject", &ReviewRequest { request_ids })
            .await?;
        self.ctx.mutated("reject-deposit")?;
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_request_serializes_snake_case_ids() {
        // The backend expects `request_ids` verbatim on this endpoint,
        // unlike the camelCase entity payloads.
        let payload = ReviewRequest {
            request_ids: vec!["id1".to_string(), "id2".to_string()],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({"request_ids": ["id1", "id2"]}));
    }
}
