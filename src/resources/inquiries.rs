//! User inquiries (support tickets)
//!
//! Inquiries are created by end users through the app; the operator only
//! answers or removes them, so there is no create operation here.

use super::Ctx;
use crate::error::Result;
use crate::query::{Ack, ListParams, Page};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cache resource name for inquiry list queries
pub const RESOURCE: &str = "get-inquiries";

/// A user-submitted inquiry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    /// Backend-issued id
    pub id: String,
    /// Submitting user id
    pub user_id: String,
    /// Inquiry subject
    pub title: String,
    /// Inquiry body
    #[serde(default)]
    pub content: String,
    /// `OPEN` or `ANSWERED`
    #[serde(default)]
    pub status: String,
    /// When the operator answered, if they have
    #[serde(default)]
    pub answered_at: Option<DateTime<Utc>>,
}

/// Client for the inquiry endpoints
pub struct InquiriesClient {
    ctx: Ctx,
}

impl InquiriesClient {
    pub(crate) fn new(ctx: Ctx) -> Self {
        Self { ctx }
    }

    /// Lists inquiries, cached under `get-inquiries`
    pub async fn list(&self, params: &ListParams) -> Result<Page<Inquiry>> {
        self.ctx
            .list_page(RESOURCE, "/inquiries", "inquiries", params)
            .await
    }

    /// Fetches a single inquiry (uncached)
    pub async fn get(&self, id: &str) -> Result<Inquiry> {
        self.ctx
            .api
            .get_json(&format!("/inquiries/{}", id), &[])
            .await
    }

    /// Posts an answer to an inquiry
    pub async fn answer(&self, id: &str, answer: &str) -> Result<Inquiry> {
        let body = serde_json::json!({ "answer": answer });
        let answered = self
            .ctx
            .api
            .post_json(&format!("/inquiries/{}/answer", id), &body)
            .await?;
        self.ctx.mutated("answer-inquiry")?;
        Ok(answered)
    }

    /// Removes an inquiry
    pub async fn delete(&self, id: &str) -> Result<Ack> {
        let ack = self
            .ctx
            .api
            .delete_json(&format!("/inquiries/{}", id))
            .await?;
        self.ctx.mutated("delete-inquiry")?;
        Ok(ack)
    }
}
