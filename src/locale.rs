//! Locale service for operator-facing strings
//!
//! Holds the active locale, persisted as a preference, and resolves message
//! keys against per-locale YAML bundles. Lookup never fails: a key absent
//! from the bundle (or an entirely unknown locale) falls back to the literal
//! key string, so a missing translation degrades to something greppable
//! instead of an error.

use crate::error::{MsqAdminError, Result};
use crate::prefs::PreferenceStore;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

const PREF_KEY: &str = "locale";

/// Per-locale message bundles plus the active-locale cell
pub struct LocaleService {
    current: RwLock<String>,
    bundles: HashMap<String, HashMap<String, String>>,
    prefs: Arc<PreferenceStore>,
}

impl LocaleService {
    /// Creates the service with the built-in `en`/`ko` bundles
    ///
    /// The active locale is read from the preference store when previously
    /// set, otherwise `default_locale` applies.
    ///
    /// # Errors
    ///
    /// Returns [`MsqAdminError::Locale`] if a built-in bundle fails to
    /// parse (a build-time defect) or the preference store is unreadable.
    pub fn new(prefs: Arc<PreferenceStore>, default_locale: &str) -> Result<Self> {
        let mut bundles = HashMap::new();
        bundles.insert("en".to_string(), parse_bundle(include_str!("locales/en.yaml"))?);
        bundles.insert("ko".to_string(), parse_bundle(include_str!("locales/ko.yaml"))?);

        let current = prefs
            .get_string(PREF_KEY)?
            .unwrap_or_else(|| default_locale.to_string());

        Ok(Self {
            current: RwLock::new(current),
            bundles,
            prefs,
        })
    }

    /// Registers an additional bundle, replacing any existing one
    ///
    /// Lets deployments ship extra locales without rebuilding.
    pub fn add_bundle(&mut self, locale: &str, yaml: &str) -> Result<()> {
        self.bundles.insert(locale.to_string(), parse_bundle(yaml)?);
        Ok(())
    }

    /// The active locale
    pub fn locale(&self) -> String {
        self.current
            .read()
            .map(|l| l.clone())
            .unwrap_or_else(|_| "en".to_string())
    }

    /// Switches the active locale and persists the choice
    ///
    /// Unknown locales are accepted; every lookup under them falls back to
    /// the key.
    pub fn set_locale(&self, locale: &str) -> Result<()> {
        self.prefs.set_string(PREF_KEY, locale)?;
        if let Ok(mut cell) = self.current.write() {
            *cell = locale.to_string();
        }
        tracing::debug!("Locale set to {}", locale);
        Ok(())
    }

    /// Resolves `key` in the active locale, falling back to the key itself
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use msqadm::locale::LocaleService;
    /// use msqadm::prefs::PreferenceStore;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let prefs = Arc::new(PreferenceStore::open_at(dir.path().join("p.json")).unwrap());
    /// let locale = LocaleService::new(prefs, "en").unwrap();
    /// assert_eq!(locale.text("login.success"), "Logged in");
    /// assert_eq!(locale.text("no.such.key"), "no.such.key");
    /// ```
    pub fn text(&self, key: &str) -> String {
        let locale = self.locale();
        self.bundles
            .get(&locale)
            .and_then(|bundle| bundle.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Reverse lookup: finds the key whose translation equals `value`
    ///
    /// Linear scan of the active bundle; returns `None` when no translation
    /// matches.
    pub fn text_to_key(&self, value: &str) -> Option<String> {
        let locale = self.locale();
        self.bundles.get(&locale).and_then(|bundle| {
            bundle
                .iter()
                .find(|(_, v)| v.as_str() == value)
                .map(|(k, _)| k.clone())
        })
    }
}

fn parse_bundle(yaml: &str) -> Result<HashMap<String, String>> {
    serde_yaml::from_str(yaml)
        .map_err(|e| MsqAdminError::Locale(format!("malformed bundle: {}", e)).into())
}
