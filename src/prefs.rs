//! Local preference storage for msqadm
//!
//! Operator preferences (locale, timezone, grid column layouts) are kept in a
//! single JSON key/value file in the user's data directory, the desktop
//! analog of the browser storage the admin console uses. Writes go through
//! to disk immediately so preferences survive the process.

use crate::error::{MsqAdminError, Result};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// JSON-file-backed key/value preference store
///
/// Keys are plain strings; values are arbitrary JSON. The file is created on
/// first write. All access goes through a mutex, matching the single-writer
/// usage pattern of the CLI.
pub struct PreferenceStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, Value>>,
}

impl PreferenceStore {
    /// Open the preference store at the default location
    ///
    /// The default path is `prefs.json` inside the msqadm project data
    /// directory. The `MSQADM_PREFS_PATH` environment variable overrides the
    /// location, which keeps tests and alternate profiles away from the
    /// operator's real preferences.
    ///
    /// # Errors
    ///
    /// Returns [`MsqAdminError::Storage`] if the data directory cannot be
    /// determined or created, or if an existing file fails to parse.
    pub fn open() -> Result<Self> {
        if let Ok(override_path) = std::env::var("MSQADM_PREFS_PATH") {
            return Self::open_at(override_path);
        }

        let proj_dirs = ProjectDirs::from("io", "msquared", "msqadm")
            .ok_or_else(|| MsqAdminError::Storage("Could not determine data directory".into()))?;

        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)
            .map_err(|e| MsqAdminError::Storage(format!("Failed to create data directory: {}", e)))?;

        Self::open_at(data_dir.join("prefs.json"))
    }

    /// Open the preference store at a specific path
    ///
    /// Primarily useful for tests, where the default application data
    /// directory is not desirable.
    ///
    /// # Examples
    ///
    /// ```
    /// use msqadm::prefs::PreferenceStore;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let store = PreferenceStore::open_at(dir.path().join("prefs.json")).unwrap();
    /// store.set_string("locale", "ko").unwrap();
    /// assert_eq!(store.get_string("locale").unwrap(), Some("ko".to_string()));
    /// ```
    pub fn open_at<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(MsqAdminError::Io)?;
            serde_json::from_str(&contents)
                .map_err(|e| MsqAdminError::Storage(format!("Corrupt preference file: {}", e)))?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Store a string value under `key`
    pub fn set_string(&self, key: &str, value: &str) -> Result<()> {
        self.set_json(key, &value.to_string())
    }

    /// Read the string value stored under `key`, if any
    pub fn get_string(&self, key: &str) -> Result<Option<String>> {
        self.get_json(key)
    }

    /// Serialize `value` to JSON and store it under `key`
    ///
    /// # Errors
    ///
    /// Returns [`MsqAdminError::Storage`] if the file cannot be written.
    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_value(value).map_err(MsqAdminError::Serialization)?;
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), json);
        self.flush(&entries)
    }

    /// Read and deserialize the JSON value stored under `key`, if any
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let entries = self.entries.lock().map_err(|_| poisoned())?;
        match entries.get(key) {
            None => Ok(None),
            Some(value) => {
                let parsed =
                    serde_json::from_value(value.clone()).map_err(MsqAdminError::Serialization)?;
                Ok(Some(parsed))
            }
        }
    }

    /// Remove the value stored under `key`
    ///
    /// Removing an absent key is a no-op.
    pub fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }

    fn flush(&self, entries: &BTreeMap<String, Value>) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(entries).map_err(MsqAdminError::Serialization)?;
        std::fs::write(&self.path, contents)
            .map_err(|e| MsqAdminError::Storage(format!("Failed to write preference file: {}", e)))?;
        Ok(())
    }
}

fn poisoned() -> MsqAdminError {
    MsqAdminError::Storage("preference store lock poisoned".into())
}
