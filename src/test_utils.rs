//! Test utilities for msqadm
//!
//! Shared helpers for unit tests: temporary preference stores and a config
//! wired to a caller-supplied base URL (typically a mock server).

use crate::config::Config;
use crate::prefs::PreferenceStore;
use std::sync::Arc;
use tempfile::TempDir;

/// Create a preference store backed by a temporary directory
///
/// The directory handle must be kept alive for the duration of the test.
pub fn temp_prefs() -> (TempDir, Arc<PreferenceStore>) {
    let dir = TempDir::new().expect("Failed to create temporary directory");
    let store = PreferenceStore::open_at(dir.path().join("prefs.json"))
        .expect("Failed to open preference store");
    (dir, Arc::new(store))
}

/// A default config pointed at the given backend base URL
pub fn test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.api.base_url = base_url.to_string();
    config
}
