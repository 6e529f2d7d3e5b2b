//! Per-entity resource clients
//!
//! One module per backend entity, all following the same contract: `list`
//! goes through the query cache under the entity's resource key, `get`
//! fetches a single record, and mutations pass the payload through to the
//! backend and, on success, apply the central invalidation map. The clients
//! are pure pass-through: no client-side validation, merging, or conflict
//! resolution; the backend is the authority on every write.

use crate::cache::{QueryCache, QueryKey};
use crate::error::Result;
use crate::http::ApiClient;
use crate::invalidation::InvalidationMap;
use crate::query::{ListParams, Page};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub mod bulk_transfers;
pub mod communities;
pub mod deposits;
pub mod inquiries;
pub mod news;
pub mod notifications;
pub mod popups;
pub mod reserves;
pub mod txid_history;
pub mod user_education;

pub use bulk_transfers::BulkTransfersClient;
pub use communities::CommunitiesClient;
pub use deposits::DepositsClient;
pub use inquiries::InquiriesClient;
pub use news::NewsClient;
pub use notifications::NotificationsClient;
pub use popups::PopupsClient;
pub use reserves::ReservesClient;
pub use txid_history::TxIdHistoryClient;
pub use user_education::UserEducationClient;

/// Shared dependencies handed to every resource client
#[derive(Clone)]
pub(crate) struct Ctx {
    pub(crate) api: Arc<ApiClient>,
    pub(crate) cache: Arc<QueryCache>,
    pub(crate) invalidations: Arc<InvalidationMap>,
}

impl Ctx {
    /// Cached list fetch: the uniform query half of the contract
    ///
    /// The response envelope's entity-specific list field is adapted onto
    /// [`Page`] before caching, so the cache holds the common shape.
    pub(crate) async fn list_page<T>(
        &self,
        resource: &str,
        path: &str,
        list_field: &str,
        params: &ListParams,
    ) -> Result<Page<T>>
    where
        T: Serialize + DeserializeOwned + Clone + PartialEq,
    {
        let key = QueryKey::new(resource, &params.cache_params());
        let query = params.to_query();
        self.cache
            .get_or_fetch(key, || async {
                let envelope: Value = self.api.get_json(path, &query).await?;
                Page::from_envelope(envelope, list_field)
            })
            .await
    }

    /// Post-mutation hook: expire whatever the mutation declares
    pub(crate) fn mutated(&self, mutation: &str) -> Result<()> {
        self.invalidations.apply(&self.cache, mutation)
    }
}

/// The full set of entity clients, constructed once at startup
pub struct Resources {
    /// Platform news articles
    pub news: NewsClient,
    /// Community records
    pub communities: CommunitiesClient,
    /// User inquiries (support tickets)
    pub inquiries: InquiriesClient,
    /// Operator-sent notifications
    pub notifications: NotificationsClient,
    /// In-app pop-up banners
    pub popups: PopupsClient,
    /// Scheduled token reserves
    pub reserves: ReservesClient,
    /// On-chain transaction id history (read-only)
    pub txid_history: TxIdHistoryClient,
    /// User education course completions
    pub user_education: UserEducationClient,
    /// Operator-initiated bulk transfers
    pub bulk_transfers: BulkTransfersClient,
    /// Deposit requests awaiting review
    pub deposits: DepositsClient,
}

impl Resources {
    /// Wires every client to the shared API client, cache, and invalidation
    /// map
    pub fn new(
        api: Arc<ApiClient>,
        cache: Arc<QueryCache>,
        invalidations: Arc<InvalidationMap>,
    ) -> Self {
        let ctx = Ctx {
            api,
            cache,
            invalidations,
        };
        Self {
            news: NewsClient::new(ctx.clone()),
            communities: CommunitiesClient::new(ctx.clone()),
            inquiries: InquiriesClient::new(ctx.clone()),
            notifications: NotificationsClient::new(ctx.clone()),
            popups: PopupsClient::new(ctx.clone()),
            reserves: ReservesClient::new(ctx.clone()),
            txid_history: TxIdHistoryClient::new(ctx.clone()),
            user_education: UserEducationClient::new(ctx.clone()),
            bulk_transfers: BulkTransfersClient::new(ctx.clone()),
            deposits: DepositsClient::new(ctx),
        }
    }
}
