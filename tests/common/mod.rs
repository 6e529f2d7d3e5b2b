//! Shared integration-test harness
//!
//! Wires the real service graph (API client, cache, invalidation map,
//! resource clients, session) against a `wiremock` mock server and an
//! in-memory credential store.

use msqadm::auth::{CredentialStore, MemoryStore, Session};
use msqadm::cache::QueryCache;
use msqadm::config::ApiConfig;
use msqadm::http::ApiClient;
use msqadm::invalidation::InvalidationMap;
use msqadm::resources::Resources;
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

/// Everything a test needs to drive the client against a mock backend
pub struct Harness {
    pub server: MockServer,
    pub api: Arc<ApiClient>,
    pub cache: Arc<QueryCache>,
    pub credentials: Arc<MemoryStore>,
    pub resources: Resources,
    pub session: Session,
}

/// Build a harness with an empty credential store
pub async fn harness() -> Harness {
    harness_with(MemoryStore::new()).await
}

/// Build a harness with a pre-seeded token
pub async fn harness_with_token(token: &str) -> Harness {
    harness_with(MemoryStore::with_token(token)).await
}

async fn harness_with(store: MemoryStore) -> Harness {
    let server = MockServer::start().await;
    let credentials = Arc::new(store);
    let dyn_credentials: Arc<dyn CredentialStore> = credentials.clone();

    let config = ApiConfig {
        base_url: server.uri(),
        timeout_seconds: 5,
    };
    let api = Arc::new(ApiClient::new(&config, dyn_credentials.clone()).unwrap());
    let cache = Arc::new(QueryCache::with_windows(
        Duration::from_secs(60),
        Duration::from_secs(300),
    ));
    let invalidations = Arc::new(InvalidationMap::standard());
    let resources = Resources::new(api.clone(), cache.clone(), invalidations);
    let session = Session::new(api.clone(), dyn_credentials);

    Harness {
        server,
        api,
        cache,
        credentials,
        resources,
        session,
    }
}
