//! Deployed-version check
//!
//! The backend exposes a version endpoint naming the currently deployed
//! client version. A mismatch (deployed newer than running) means the
//! operator should update; [`VersionChecker::check`] answers once, and
//! [`VersionChecker::watch`] polls on an interval and publishes changes on a
//! watch channel so a long-running session can prompt when a deploy lands
//! mid-use.

use crate::error::{MsqAdminError, Result};
use crate::http::ApiClient;
use semver::Version;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Outcome of comparing the running version against the deployed one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionStatus {
    /// Running version is at least the deployed one
    UpToDate,
    /// A newer version is deployed
    Outdated {
        /// The deployed version
        latest: String,
    },
}

#[derive(Debug, Deserialize)]
struct VersionResponse {
    version: String,
}

/// Client for the version endpoint
pub struct VersionChecker {
    api: Arc<ApiClient>,
    path: String,
    running: Version,
}

impl VersionChecker {
    /// Creates a checker comparing against this build's version
    ///
    /// # Errors
    ///
    /// Returns [`MsqAdminError::VersionCheck`] if the compiled-in package
    /// version is not valid semver (unreachable for release builds).
    pub fn new(api: Arc<ApiClient>, path: &str) -> Result<Self> {
        Self::with_running_version(api, path, env!("CARGO_PKG_VERSION"))
    }

    /// Creates a checker with an explicit running version (tests)
    pub fn with_running_version(api: Arc<ApiClient>, path: &str, running: &str) -> Result<Self> {
        let running = Version::parse(running)
            .map_err(|e| MsqAdminError::VersionCheck(format!("bad running version: {}", e)))?;
        Ok(Self {
            api,
            path: path.to_string(),
            running,
        })
    }

    /// Fetches the deployed version once and compares
    ///
    /// # Errors
    ///
    /// Propagates HTTP failures; returns [`MsqAdminError::VersionCheck`]
    /// when the endpoint reports something that is not semver.
    pub async fn check(&self) -> Result<VersionStatus> {
        let response: VersionResponse = self.api.get_json(&self.path, &[]).await?;
        let deployed = Version::parse(&response.version).map_err(|e| {
            MsqAdminError::VersionCheck(format!(
                "endpoint reported '{}': {}",
                response.version, e
            ))
        })?;

        if deployed > self.running {
            tracing::warn!(
                "Deployed version {} is newer than running {}",
                deployed,
                self.running
            );
            Ok(VersionStatus::Outdated {
                latest: deployed.to_string(),
            })
        } else {
            Ok(VersionStatus::UpToDate)
        }
    }

    /// Polls the endpoint on `interval`, publishing status changes
    ///
    /// The first poll happens after one interval. Poll failures are logged
    /// and leave the last published status in place: a flaky network never
    /// flips the status back and forth.
    pub fn watch(self: Arc<Self>, interval: Duration) -> tokio::sync::watch::Receiver<VersionStatus> {
        let (tx, rx) = tokio::sync::watch::channel(VersionStatus::UpToDate);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // First tick fires immediately; skip it so the initial status
            // stands for a full interval.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                match self.check().await {
                    Ok(status) => {
                        if *tx.borrow() != status && tx.send(status).is_err() {
                            break;
                        }
                    }
                    Err(e) => tracing::warn!("Version poll failed: {}", e),
                }
            }
        });
        rx
    }
}
