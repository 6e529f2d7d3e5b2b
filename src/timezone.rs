//! Timezone preference
//!
//! The operator's timezone is an IANA identifier string stored as a
//! preference and used purely as a formatting parameter: timestamps are
//! rendered in UTC with the preferred zone carried as a label for the
//! reader. The client deliberately ships no offset database; the backend
//! and every wire timestamp are UTC, and conversion stays the display
//! layer's concern.

use crate::error::{MsqAdminError, Result};
use crate::prefs::PreferenceStore;
use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};

const PREF_KEY: &str = "timezone";

/// Persisted timezone preference
pub struct TimezoneService {
    current: RwLock<String>,
    prefs: Arc<PreferenceStore>,
}

impl TimezoneService {
    /// Creates the service, reading any persisted preference
    ///
    /// Falls back to `default_timezone` (normally `UTC`) when nothing was
    /// stored.
    pub fn new(prefs: Arc<PreferenceStore>, default_timezone: &str) -> Result<Self> {
        let current = prefs
            .get_string(PREF_KEY)?
            .unwrap_or_else(|| default_timezone.to_string());
        Ok(Self {
            current: RwLock::new(current),
            prefs,
        })
    }

    /// The active timezone identifier
    pub fn timezone(&self) -> String {
        self.current
            .read()
            .map(|tz| tz.clone())
            .unwrap_or_else(|_| "UTC".to_string())
    }

    /// Sets and persists the timezone preference
    ///
    /// # Errors
    ///
    /// Returns [`MsqAdminError::Timezone`] unless the value is `UTC` or has
    /// the `Area/Location` shape of an IANA identifier. This is a shape
    /// check only; full validation belongs to whatever renders with it.
    pub fn set_timezone(&self, timezone: &str) -> Result<()> {
        if !is_valid_shape(timezone) {
            return Err(MsqAdminError::Timezone(timezone.to_string()).into());
        }
        self.prefs.set_string(PREF_KEY, timezone)?;
        if let Ok(mut cell) = self.current.write() {
            *cell = timezone.to_string();
        }
        tracing::debug!("Timezone set to {}", timezone);
        Ok(())
    }

    /// Renders a timestamp with the preferred zone as a label
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use chrono::{TimeZone, Utc};
    /// use msqadm::prefs::PreferenceStore;
    /// use msqadm::timezone::TimezoneService;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let prefs = Arc::new(PreferenceStore::open_at(dir.path().join("p.json")).unwrap());
    /// let tz = TimezoneService::new(prefs, "UTC").unwrap();
    /// let dt = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    /// assert_eq!(tz.format_timestamp(&dt), "2024-03-01 09:00:00 (UTC)");
    /// ```
    pub fn format_timestamp(&self, dt: &DateTime<Utc>) -> String {
        format!("{} ({})", dt.format("%Y-%m-%d %H:%M:%S"), self.timezone())
    }
}

fn is_valid_shape(timezone: &str) -> bool {
    if timezone == "UTC" {
        return true;
    }
    match timezone.split_once('/') {
        None => false,
        Some((area, location)) => {
            !area.is_empty()
                && !location.is_empty()
                && timezone
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '-' | '+'))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> (tempfile::TempDir, TimezoneService) {
        let (dir, prefs) = crate::test_utils::temp_prefs();
        let tz = TimezoneService::new(prefs, "UTC").unwrap();
        (dir, tz)
    }

    #[test]
    fn test_default_is_utc() {
        let (_dir, tz) = service();
        assert_eq!(tz.timezone(), "UTC");
    }

    #[test]
    fn test_set_valid_iana_identifier() {
        let (_dir, tz) = service();
        tz.set_timezone("Asia/Seoul").unwrap();
        assert_eq!(tz.timezone(), "Asia/Seoul");
    }

    #[test]
    fn test_reject_malformed_identifier() {
        let (_dir, tz) = service();
        assert!(tz.set_timezone("not a zone").is_err());
        assert!(tz.set_timezone("Seoul").is_err());
        assert!(tz.set_timezone("/Seoul").is_err());
        // Preference unchanged after rejects.
        assert_eq!(tz.timezone(), "UTC");
    }

    #[test]
    fn test_preference_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        {
            let prefs = Arc::new(PreferenceStore::open_at(&path).unwrap());
            let tz = TimezoneService::new(prefs, "UTC").unwrap();
            tz.set_timezone("America/New_York").unwrap();
        }
        let prefs = Arc::new(PreferenceStore::open_at(&path).unwrap());
        let tz = TimezoneService::new(prefs, "UTC").unwrap();
        assert_eq!(tz.timezone(), "America/New_York");
    }
}
