//! Central mutation-to-cache invalidation mapping
//!
//! Every mutation that should expire cached list data declares it here, in
//! one table, rather than naming cache keys at each call site. Resource
//! clients call [`InvalidationMap::apply`] after a successful mutation; the
//! table guarantees each mutation targets exactly the resource key its
//! query caches under, so a query and its related mutations can never drift
//! apart on key names.

use crate::cache::QueryCache;
use crate::error::Result;
use std::collections::HashMap;

/// Declarative mapping from mutation name to invalidated query resources
pub struct InvalidationMap {
    map: HashMap<&'static str, Vec<&'static str>>,
}

impl InvalidationMap {
    /// Builds the standard table covering every entity mutation
    ///
    /// # Examples
    ///
    /// ```
    /// use msqadm::invalidation::InvalidationMap;
    ///
    /// let map = InvalidationMap::standard();
    /// assert_eq!(map.targets("add-news"), &["get-news"]);
    /// assert_eq!(map.targets("approve-deposit"), &["deposit-requests"]);
    /// assert!(map.targets("unknown-mutation").is_empty());
    /// ```
    pub fn standard() -> Self {
        let mut map: HashMap<&'static str, Vec<&'static str>> = HashMap::new();

        for mutation in ["add-news", "update-news", "delete-news"] {
            map.insert(mutation, vec!["get-news"]);
        }
        for mutation in ["add-community", "update-community", "delete-community"] {
            map.insert(mutation, vec!["get-communities"]);
        }
        for mutation in ["answer-inquiry", "delete-inquiry"] {
            map.insert(mutation, vec!["get-inquiries"]);
        }
        for mutation in [
            "add-notification",
            "update-notification",
            "delete-notification",
        ] {
            map.insert(mutation, vec!["get-notifications"]);
        }
        for mutation in ["add-popup", "update-popup", "delete-popup"] {
            map.insert(mutation, vec!["get-popups"]);
        }
        for mutation in ["add-reserve", "update-reserve", "cancel-reserve"] {
            map.insert(mutation, vec!["get-reserves"]);
        }
        for mutation in ["add-user-education", "delete-user-education"] {
            map.insert(mutation, vec!["get-user-education"]);
        }
        // A submitted bulk transfer also shows up as pending deposit
        // requests, so both lists go stale.
        map.insert(
            "add-bulk-transfer",
            vec!["get-bulk-transfers", "deposit-requests"],
        );
        for mutation in ["approve-deposit", "reject-deposit"] {
            map.insert(mutation, vec!["deposit-requests"]);
        }

        Self { map }
    }

    /// Query resources invalidated by `mutation`
    ///
    /// Unknown mutations invalidate nothing.
    pub fn targets(&self, mutation: &str) -> &[&'static str] {
        self.map.get(mutation).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Invalidates every resource `mutation` targets in `cache`
    pub fn apply(&self, cache: &QueryCache, mutation: &str) -> Result<()> {
        for resource in self.targets(mutation) {
            let count = cache.invalidate(resource)?;
            tracing::debug!(
                "Mutation '{}' invalidated {} entries under '{}'",
                mutation,
                count,
                resource
            );
        }
        Ok(())
    }
}

impl Default for InvalidationMap {
    fn default() -> Self {
        Self::standard()
    }
}
