//! Process-wide query cache
//!
//! List responses from the backend are cached under a composite key: the
//! logical resource name plus the full, ordered parameter tuple (absent
//! parameters included as nulls, so `list(limit=10)` and `list(limit=10,
//! search="x")` occupy distinct slots).
//!
//! Three behaviors matter here and are tested:
//!
//! - a fresh entry (within the staleness window, not invalidated) is served
//!   without touching the network;
//! - at most one fetch is in flight per key; concurrent callers coalesce
//!   onto a single fetch through a per-key async lock with a double-check
//!   after acquisition;
//! - invalidating a resource marks every entry under that resource stale, so
//!   the next read refetches. Fetch errors propagate unchanged and leave any
//!   previous entry untouched.
//!
//! Eviction is time-based: [`QueryCache::gc`] drops entries older than the
//! configured GC window.

use crate::config::CacheConfig;
use crate::error::{MsqAdminError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Composite cache key: resource name + ordered parameter tuple
///
/// The parameter tuple is canonicalized to its JSON encoding so that keys
/// hash and compare by value.
///
/// # Examples
///
/// ```
/// use msqadm::cache::QueryKey;
/// use serde_json::json;
///
/// let key = QueryKey::new("get-news", &[json!(10), json!(null)]);
/// assert_eq!(key.resource(), "get-news");
/// assert_eq!(key.to_string(), r#"["get-news",10,null]"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    resource: String,
    params: String,
}

impl QueryKey {
    /// Builds a key from a resource name and its parameter tuple
    pub fn new(resource: &str, params: &[Value]) -> Self {
        let params = serde_json::to_string(params).unwrap_or_else(|_| "[]".to_string());
        Self {
            resource: resource.to_string(),
            params,
        }
    }

    /// Builds a key for a parameterless query
    pub fn bare(resource: &str) -> Self {
        Self::new(resource, &[])
    }

    /// The logical resource name component
    pub fn resource(&self) -> &str {
        &self.resource
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Render as the full ordered tuple, resource name first.
        let inner = self.params.trim_start_matches('[');
        if inner == "]" {
            write!(f, "[\"{}\"]", self.resource)
        } else {
            write!(f, "[\"{}\",{}", self.resource, inner)
        }
    }
}

struct CacheEntry {
    value: Value,
    fetched_at: Instant,
    stale: bool,
}

/// Process-wide request/response cache
pub struct QueryCache {
    stale_after: Duration,
    gc_after: Duration,
    entries: Mutex<HashMap<QueryKey, CacheEntry>>,
    inflight: tokio::sync::Mutex<HashMap<QueryKey, Arc<tokio::sync::Mutex<()>>>>,
}

impl QueryCache {
    /// Creates a cache with windows taken from configuration
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_windows(
            Duration::from_secs(config.stale_seconds),
            Duration::from_secs(config.gc_seconds),
        )
    }

    /// Creates a cache with explicit staleness and GC windows
    pub fn with_windows(stale_after: Duration, gc_after: Duration) -> Self {
        Self {
            stale_after,
            gc_after,
            entries: Mutex::new(HashMap::new()),
            inflight: tokio::sync::Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached value for `key`, or runs `fetch` and caches it
    ///
    /// A fresh cached entry is returned without invoking `fetch`. Otherwise
    /// the caller acquires the key's in-flight lock; whoever gets it first
    /// fetches, everyone behind re-checks the cache after the lock and reads
    /// the stored result.
    ///
    /// # Errors
    ///
    /// Fetch errors propagate unchanged; a previously cached entry for the
    /// key is left as-is (still stale) so a later retry can repopulate it.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(value) = self.lookup_fresh(&key)? {
            tracing::debug!("Cache hit for {}", key);
            return Ok(serde_json::from_value(value).map_err(MsqAdminError::Serialization)?);
        }

        let gate = {
            let mut inflight = self.inflight.lock().await;
            inflight
                .entry(key.clone())
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };
        let _guard = gate.lock().await;

        // A coalesced caller lands here after the winner stored the result.
        if let Some(value) = self.lookup_fresh(&key)? {
            tracing::debug!("Coalesced onto in-flight fetch for {}", key);
            return Ok(serde_json::from_value(value).map_err(MsqAdminError::Serialization)?);
        }

        tracing::debug!("Cache miss for {}, fetching", key);
        let outcome = async {
            let fetched = fetch().await?;
            let value = serde_json::to_value(&fetched).map_err(MsqAdminError::Serialization)?;
            self.store(&key, value)?;
            Ok(fetched)
        }
        .await;

        // The gate entry is removed whether the fetch succeeded or not;
        // otherwise error-only keys would pile up in the in-flight map.
        let mut inflight = self.inflight.lock().await;
        inflight.remove(&key);

        outcome
    }

    /// Marks every entry under `resource` stale
    ///
    /// The next read for any matching key refetches. Returns the number of
    /// entries invalidated.
    pub fn invalidate(&self, resource: &str) -> Result<usize> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        let mut count = 0;
        for (key, entry) in entries.iter_mut() {
            if key.resource == resource && !entry.stale {
                entry.stale = true;
                count += 1;
            }
        }
        if count > 0 {
            tracing::debug!("Invalidated {} cached entries under '{}'", count, resource);
        }
        Ok(count)
    }

    /// Marks a single exact key stale
    pub fn invalidate_key(&self, key: &QueryKey) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        if let Some(entry) = entries.get_mut(key) {
            entry.stale = true;
        }
        Ok(())
    }

    /// Evicts entries older than the GC window
    ///
    /// Returns the number of entries evicted.
    pub fn gc(&self) -> Result<usize> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        let before = entries.len();
        let gc_after = self.gc_after;
        entries.retain(|_, entry| entry.fetched_at.elapsed() < gc_after);
        Ok(before - entries.len())
    }

    /// Number of cached entries, stale ones included
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// True when the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when `key` is cached and fresh (would be served without a fetch)
    pub fn is_fresh(&self, key: &QueryKey) -> bool {
        self.lookup_fresh(key).ok().flatten().is_some()
    }

    fn lookup_fresh(&self, key: &QueryKey) -> Result<Option<Value>> {
        let entries = self.entries.lock().map_err(|_| poisoned())?;
        Ok(entries.get(key).and_then(|entry| {
            if !entry.stale && entry.fetched_at.elapsed() < self.stale_after {
                Some(entry.value.clone())
            } else {
                None
            }
        }))
    }

    fn store(&self, key: &QueryKey, value: Value) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        entries.insert(
            key.clone(),
            CacheEntry {
                value,
                fetched_at: Instant::now(),
                stale: false,
            },
        );
        Ok(())
    }
}

fn poisoned() -> MsqAdminError {
    MsqAdminError::Storage("query cache lock poisoned".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn test_cache() -> QueryCache {
        QueryCache::with_windows(Duration::from_secs(60), Duration::from_secs(300))
    }

    #[tokio::test]
    async fn test_fresh_entry_served_without_fetch() {
        let cache = test_cache();
        let key = QueryKey::new("get-news", &[json!(10)]);
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let got: Vec<String> = cache
                .get_or_fetch(key.clone(), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec!["a".to_string()])
                })
                .await
                .unwrap();
            assert_eq!(got, vec!["a".to_string()]);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidation_triggers_refetch() {
        let cache = test_cache();
        let key = QueryKey::new("get-news", &[json!(10)]);
        let calls = AtomicUsize::new(0);

        let fetch = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({"n": 1}))
        };
        let _: Value = cache.get_or_fetch(key.clone(), fetch).await.unwrap();
        assert!(cache.is_fresh(&key));

        assert_eq!(cache.invalidate("get-news").unwrap(), 1);
        assert!(!cache.is_fresh(&key));

        let _: Value = cache
            .get_or_fetch(key.clone(), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(json!({"n": 2}))
            })
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_only_matching_resource() {
        let cache = test_cache();
        let news = QueryKey::new("get-news", &[json!(10)]);
        let popups = QueryKey::new("get-popups", &[json!(10)]);

        let _: Value = cache
            .get_or_fetch(news.clone(), || async { Ok(json!(1)) })
            .await
            .unwrap();
        let _: Value = cache
            .get_or_fetch(popups.clone(), || async { Ok(json!(2)) })
            .await
            .unwrap();

        cache.invalidate("get-news").unwrap();
        assert!(!cache.is_fresh(&news));
        assert!(cache.is_fresh(&popups));
    }

    #[tokio::test]
    async fn test_concurrent_callers_coalesce_onto_one_fetch() {
        let cache = Arc::new(test_cache());
        let key = QueryKey::new("get-communities", &[json!(null)]);
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let cache = cache.clone();
            let key = key.clone();
            let calls = calls.clone();
            handles.push(tokio::spawn(async move {
                let got: Value = cache
                    .get_or_fetch(key, || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        Ok(json!({"ok": true}))
                    })
                    .await
                    .unwrap();
                got
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap(), json!({"ok": true}));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_error_propagates_and_preserves_nothing() {
        let cache = test_cache();
        let key = QueryKey::new("get-inquiries", &[]);

        let result: Result<Value> = cache
            .get_or_fetch(key.clone(), || async {
                Err(MsqAdminError::Api {
                    status: 500,
                    message: "down".to_string(),
                }
                .into())
            })
            .await;
        assert!(result.is_err());
        assert!(!cache.is_fresh(&key));

        // A later successful fetch repopulates the slot.
        let got: Value = cache
            .get_or_fetch(key.clone(), || async { Ok(json!("up")) })
            .await
            .unwrap();
        assert_eq!(got, json!("up"));
    }

    #[tokio::test]
    async fn test_failed_fetch_releases_inflight_gate() {
        let cache = test_cache();
        let key = QueryKey::new("get-news", &[json!(1)]);

        let result: Result<Value> = cache
            .get_or_fetch(key.clone(), || async {
                Err(MsqAdminError::Api {
                    status: 500,
                    message: "down".to_string(),
                }
                .into())
            })
            .await;
        assert!(result.is_err());
        assert!(cache.inflight.lock().await.is_empty());

        let got: Value = cache
            .get_or_fetch(key, || async { Ok(json!("up")) })
            .await
            .unwrap();
        assert_eq!(got, json!("up"));
        assert!(cache.inflight.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_gc_evicts_old_entries() {
        let cache = QueryCache::with_windows(Duration::from_millis(1), Duration::from_millis(5));
        let key = QueryKey::bare("get-reserves");
        let _: Value = cache
            .get_or_fetch(key, || async { Ok(json!([])) })
            .await
            .unwrap();
        assert_eq!(cache.len(), 1);

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(cache.gc().unwrap(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_query_key_display_matches_tuple_shape() {
        let key = QueryKey::new(
            "get-news",
            &[json!(10), json!(null), json!(null), json!(null), json!(null), json!(null)],
        );
        assert_eq!(key.to_string(), r#"["get-news",10,null,null,null,null,null]"#);
        assert_eq!(QueryKey::bare("get-news").to_string(), r#"["get-news"]"#);
    }

    #[test]
    fn test_query_keys_distinct_by_params() {
        let a = QueryKey::new("get-news", &[json!(10)]);
        let b = QueryKey::new("get-news", &[json!(20)]);
        let c = QueryKey::new("get-news", &[json!(10)]);
        assert_ne!(a, b);
        assert_eq!(a, c);
    }
}
