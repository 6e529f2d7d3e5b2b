//! List query parameters and the pagination envelope
//!
//! Every list endpoint takes the same optional parameter set (pagination
//! cursors/limits, search key, date range, status filter) and answers with
//! an envelope: the entity list plus `hasNext` / `lastId` / total-count
//! metadata. Defaults are applied server-side; the client only propagates
//! what the operator set.
//!
//! The envelope's list field is named after the entity (`news`,
//! `communities`, ...); [`Page::from_envelope`] adapts those onto the one
//! common shape so resource clients stay uniform.

use crate::error::{MsqAdminError, Result};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Optional parameters shared by every list query
///
/// All fields are optional; unset fields are omitted from the query string
/// entirely so the backend applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListParams {
    /// Maximum number of records per page
    pub limit: Option<u32>,
    /// Page number, for offset-style pagination
    pub page: Option<u32>,
    /// Cursor: id of the last record of the previous page
    pub last_id: Option<String>,
    /// Free-text search key
    pub search_key: Option<String>,
    /// Inclusive start of the date range filter
    pub date_from: Option<NaiveDate>,
    /// Inclusive end of the date range filter
    pub date_to: Option<NaiveDate>,
    /// Entity-specific status filter
    pub status: Option<String>,
}

impl ListParams {
    /// Empty parameter set: the server's default page
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the page number
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the pagination cursor
    pub fn last_id(mut self, last_id: impl Into<String>) -> Self {
        self.last_id = Some(last_id.into());
        self
    }

    /// Sets the search key
    pub fn search_key(mut self, search_key: impl Into<String>) -> Self {
        self.search_key = Some(search_key.into());
        self
    }

    /// Sets the date range filter
    pub fn date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_from = Some(from);
        self.date_to = Some(to);
        self
    }

    /// Sets the status filter
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Query-string pairs for the set fields only, propagated unchanged
    ///
    /// # Examples
    ///
    /// ```
    /// use msqadm::query::ListParams;
    ///
    /// let pairs = ListParams::new().limit(10).search_key("msq").to_query();
    /// assert_eq!(
    ///     pairs,
    ///     vec![
    ///         ("limit".to_string(), "10".to_string()),
    ///         ("searchKey".to_string(), "msq".to_string()),
    ///     ]
    /// );
    /// assert!(ListParams::new().to_query().is_empty());
    /// ```
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(last_id) = &self.last_id {
            pairs.push(("lastId".to_string(), last_id.clone()));
        }
        if let Some(search_key) = &self.search_key {
            pairs.push(("searchKey".to_string(), search_key.clone()));
        }
        if let Some(date_from) = self.date_from {
            pairs.push(("dateFrom".to_string(), date_from.format("%Y-%m-%d").to_string()));
        }
        if let Some(date_to) = self.date_to {
            pairs.push(("dateTo".to_string(), date_to.format("%Y-%m-%d").to_string()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status".to_string(), status.clone()));
        }
        pairs
    }

    /// The full ordered parameter tuple for the cache key
    ///
    /// Unlike [`ListParams::to_query`], unset fields are included as nulls:
    /// the cache key is positional, and `limit=10` must occupy the same slot
    /// whether or not a search key is set.
    pub fn cache_params(&self) -> Vec<Value> {
        vec![
            json_or_null(self.limit),
            json_or_null(self.page),
            json_or_null(self.last_id.as_deref()),
            json_or_null(self.search_key.as_deref()),
            json_or_null(self.date_from.map(|d| d.format("%Y-%m-%d").to_string())),
            json_or_null(self.date_to.map(|d| d.format("%Y-%m-%d").to_string())),
            json_or_null(self.status.as_deref()),
        ]
    }
}

fn json_or_null<T: Serialize>(value: Option<T>) -> Value {
    value
        .map(|v| serde_json::to_value(v).unwrap_or(Value::Null))
        .unwrap_or(Value::Null)
}

/// Plain server acknowledgement for mutations without a richer response
///
/// The backend answers successful writes (and some failures, see the error
/// mapping in [`crate::http`]) with `{"result": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    /// Server-provided status message
    pub result: String,
}

/// Common pagination envelope for list responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Records on this page
    pub data: Vec<T>,
    /// Whether another page exists after this one
    pub has_next: bool,
    /// Cursor to request the next page
    pub last_id: Option<String>,
    /// Total record count across all pages, when the backend reports one
    pub nb_total_elements: Option<u64>,
}

impl<T: DeserializeOwned> Page<T> {
    /// Adapts an entity-specific envelope onto the common shape
    ///
    /// `list_field` names the per-entity list field (`news`, `communities`,
    /// ...). Pagination metadata fields follow the backend convention
    /// (`hasNext`, `lastId`, `nbTotalElements`); absent metadata defaults to
    /// a single terminal page.
    ///
    /// # Errors
    ///
    /// Returns [`MsqAdminError::Api`]-shaped serialization errors when the
    /// list field is missing or its records do not deserialize.
    pub fn from_envelope(mut envelope: Value, list_field: &str) -> Result<Self> {
        let raw = envelope.get_mut(list_field).map(Value::take).ok_or_else(|| {
            MsqAdminError::Api {
                status: 200,
                message: format!("response envelope missing '{}' field", list_field),
            }
        })?;
        let data: Vec<T> = serde_json::from_value(raw).map_err(MsqAdminError::Serialization)?;

        let has_next = envelope
            .get("hasNext")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let last_id = envelope
            .get("lastId")
            .and_then(Value::as_str)
            .map(String::from);
        let nb_total_elements = envelope.get("nbTotalElements").and_then(Value::as_u64);

        Ok(Self {
            data,
            has_next,
            last_id,
            nb_total_elements,
        })
    }
}
