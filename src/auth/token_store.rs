//! Session token persistence
//!
//! The admin session token is an opaque string issued by the backend at
//! login. It is stored in the OS native credential store (Keychain on macOS,
//! Secret Service on Linux, Windows Credential Manager on Windows), read
//! before every outgoing request, and destroyed at logout.
//!
//! [`CredentialStore`] is the seam: the HTTP layer and the session service
//! only see the trait, so tests swap in [`MemoryStore`] without touching a
//! real keyring.

use crate::error::Result;
use std::sync::Mutex;

/// Storage contract for the opaque session token
///
/// Implementations must be cheap to call: `load` runs on every outgoing
/// request (the interceptor reads the token each time rather than caching
/// it, so a logout in one code path is immediately visible in all others).
pub trait CredentialStore: Send + Sync {
    /// Returns the stored token, or `None` when logged out
    fn load(&self) -> Result<Option<String>>;

    /// Persists a freshly issued token, replacing any previous one
    fn save(&self, token: &str) -> Result<()>;

    /// Removes the stored token
    ///
    /// Clearing an absent token is a no-op.
    fn clear(&self) -> Result<()>;
}

/// Keyring-backed credential store
///
/// The token is stored under a service name prefixed with `msqadm-` to avoid
/// collisions with other applications using the same keyring.
///
/// # Examples
///
/// ```no_run
/// use msqadm::auth::{CredentialStore, KeyringStore};
///
/// let store = KeyringStore::new("default");
/// store.save("tok_abc123")?;
/// assert_eq!(store.load()?, Some("tok_abc123".to_string()));
/// store.clear()?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    /// Creates a store namespaced by `profile`
    ///
    /// Separate profiles (e.g. staging vs production backends) get separate
    /// keyring entries.
    pub fn new(profile: &str) -> Self {
        Self {
            service: format!("msqadm-{}", profile),
        }
    }

    fn entry(&self) -> Result<keyring::Entry> {
        Ok(keyring::Entry::new(&self.service, "api_token")?)
    }
}

impl CredentialStore for KeyringStore {
    fn load(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        self.entry()?.set_password(token)?;
        tracing::debug!("Stored session token in keyring service {}", self.service);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match self.entry()?.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process credential store for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryStore {
    token: Mutex<Option<String>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a token
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.token.lock().map(|t| t.clone()).unwrap_or(None))
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
        Ok(())
    }
}
