//! Application service graph
//!
//! Every service is constructed exactly once here, at startup, and handed to
//! whoever needs it by reference or `Arc`; there are no ambient singletons.
//! Teardown is implicit: the cache and profile are process-local, and the
//! only durable state (token, preferences) is written through at mutation
//! time.

use crate::auth::{CredentialStore, KeyringStore, Session};
use crate::cache::QueryCache;
use crate::config::Config;
use crate::error::Result;
use crate::grid::GridStateStore;
use crate::http::ApiClient;
use crate::invalidation::InvalidationMap;
use crate::locale::LocaleService;
use crate::prefs::PreferenceStore;
use crate::resources::Resources;
use crate::timezone::TimezoneService;
use crate::version::VersionChecker;
use std::sync::Arc;

/// The wired-up application: one instance per process
pub struct App {
    /// Loaded configuration
    pub config: Config,
    /// Authenticated session operations
    pub session: Session,
    /// Per-entity resource clients
    pub resources: Resources,
    /// Shared query cache (also reachable through the resource clients)
    pub cache: Arc<QueryCache>,
    /// Operator-facing string resolution
    pub locale: LocaleService,
    /// Timestamp rendering preference
    pub timezone: TimezoneService,
    /// Grid column-state persistence
    pub grids: GridStateStore,
    /// Deployed-version checker
    pub version: Arc<VersionChecker>,
}

impl App {
    /// Builds the full service graph from configuration
    ///
    /// Uses the OS keyring for the session token. Tests that need an
    /// in-memory token store wire the services directly instead of going
    /// through this constructor.
    pub fn new(config: Config) -> Result<Self> {
        let credentials: Arc<dyn CredentialStore> = Arc::new(KeyringStore::new("default"));
        Self::with_credentials(config, credentials)
    }

    /// Builds the service graph with an explicit credential store
    pub fn with_credentials(config: Config, credentials: Arc<dyn CredentialStore>) -> Result<Self> {
        let prefs = Arc::new(PreferenceStore::open()?);
        let api = Arc::new(ApiClient::new(&config.api, credentials.clone())?);
        let cache = Arc::new(QueryCache::new(&config.cache));
        let invalidations = Arc::new(InvalidationMap::standard());

        let resources = Resources::new(api.clone(), cache.clone(), invalidations);
        let session = Session::new(api.clone(), credentials);
        let locale = LocaleService::new(prefs.clone(), &config.locale)?;
        let timezone = TimezoneService::new(prefs.clone(), &config.timezone)?;
        let grids = GridStateStore::new(prefs);
        let version = Arc::new(VersionChecker::new(api, &config.version.path)?);

        Ok(Self {
            config,
            session,
            resources,
            cache,
            locale,
            timezone,
            grids,
            version,
        })
    }
}
