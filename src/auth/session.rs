//! Admin session service
//!
//! Login, logout, signup, and OTP verification are thin wrappers that post
//! credentials to the backend and store or clear the issued token. The
//! session also caches the operator profile returned at login and answers
//! permission checks against it.
//!
//! There is no token refresh scheduling and no multi-tab style sync: the
//! token lives in the credential store until logout or until the backend
//! rejects it with a 401.

use crate::auth::CredentialStore;
use crate::error::Result;
use crate::http::ApiClient;
use crate::query::Ack;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// Login credentials
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Operator email
    pub email: String,
    /// Operator password
    pub password: String,
    /// One-time code, when the account has OTP enabled
    #[serde(skip_serializing_if = "Option::is_none", rename = "otpCode")]
    pub otp_code: Option<String>,
}

/// Signup payload for a new operator account
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    /// Operator email
    pub email: String,
    /// Operator password
    pub password: String,
    /// Display name
    pub name: String,
}

/// Operator profile as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    /// Backend-issued account id
    pub id: String,
    /// Operator email
    pub email: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Primary role name (e.g. `operator`, `auditor`)
    #[serde(default)]
    pub role: String,
    /// Fine-grained permission strings granted to the account
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Super-admin flag; implies every permission
    #[serde(default, rename = "isSuper")]
    pub is_super: bool,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    profile: Profile,
}

/// Authenticated session over the admin backend
///
/// Constructed once at startup and passed by `Arc` to whoever needs it; the
/// token itself lives in the injected [`CredentialStore`], which the HTTP
/// layer reads on every request.
pub struct Session {
    api: Arc<ApiClient>,
    credentials: Arc<dyn CredentialStore>,
    profile: RwLock<Option<Profile>>,
}

impl Session {
    /// Creates a session over an API client and credential store
    ///
    /// The store should be the same one the [`ApiClient`] was built with,
    /// so that a saved token is picked up by the request interceptor.
    pub fn new(api: Arc<ApiClient>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            api,
            credentials,
            profile: RwLock::new(None),
        }
    }

    /// Logs in and persists the issued token
    ///
    /// # Errors
    ///
    /// Propagates the backend error unchanged on bad credentials; nothing is
    /// stored in that case.
    pub async fn login(&self, request: &LoginRequest) -> Result<Profile> {
        let response: LoginResponse = self.api.post_json("/auth/login", request).await?;
        self.credentials.save(&response.token)?;
        if let Ok(mut cell) = self.profile.write() {
            *cell = Some(response.profile.clone());
        }
        tracing::info!("Logged in as {}", response.profile.email);
        Ok(response.profile)
    }

    /// Verifies a one-time code, upgrading the session token
    pub async fn verify_otp(&self, code: &str) -> Result<Profile> {
        let body = serde_json::json!({ "code": code });
        let response: LoginResponse = self.api.post_json("/auth/otp/verify", &body).await?;
        self.credentials.save(&response.token)?;
        if let Ok(mut cell) = self.profile.write() {
            *cell = Some(response.profile.clone());
        }
        Ok(response.profile)
    }

    /// Registers a new operator account
    pub async fn signup(&self, request: &SignupRequest) -> Result<Ack> {
        self.api.post_json("/auth/signup", request).await
    }

    /// Logs out, clearing the stored token
    ///
    /// The backend logout call is best-effort: the local token is cleared
    /// even when the server is unreachable, so the operator is never stuck
    /// logged in.
    pub async fn logout(&self) -> Result<()> {
        let result: Result<Ack> = self.api.post_json("/auth/logout", &serde_json::json!({})).await;
        if let Err(e) = result {
            tracing::warn!("Backend logout failed, clearing local token anyway: {}", e);
        }
        self.credentials.clear()?;
        if let Ok(mut cell) = self.profile.write() {
            *cell = None;
        }
        tracing::info!("Logged out");
        Ok(())
    }

    /// The cached operator profile, when logged in this process
    pub fn profile(&self) -> Option<Profile> {
        self.profile.read().ok().and_then(|cell| cell.clone())
    }

    /// True when a token is stored
    pub fn is_authenticated(&self) -> bool {
        matches!(self.credentials.load(), Ok(Some(_)))
    }

    /// Checks the required permission against the profile's role fields
    ///
    /// Super-admins hold every permission; otherwise the requirement must
    /// match the role name or appear in the permission list. Without a
    /// cached profile the answer is always `false`.
    pub fn has_permission(&self, required: &str) -> bool {
        match self.profile() {
            None => false,
            Some(profile) => {
                profile.is_super
                    || profile.role == required
                    || profile.permissions.iter().any(|p| p == required)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryStore;
    use crate::config::ApiConfig;

    fn session_with_profile(profile: Option<Profile>) -> Session {
        let credentials: Arc<dyn CredentialStore> = Arc::new(MemoryStore::new());
        let api = Arc::new(ApiClient::new(&ApiConfig::default(), credentials.clone()).unwrap());
        let session = Session::new(api, credentials);
        if let Ok(mut cell) = session.profile.write() {
            *cell = profile;
        }
        session
    }

    fn operator_profile() -> Profile {
        Profile {
            id: "a1".to_string(),
            email: "op@msq.example".to_string(),
            name: "Operator".to_string(),
            role: "operator".to_string(),
            permissions: vec!["deposits:approve".to_string()],
            is_super: false,
        }
    }

    #[test]
    fn test_permission_matches_role_name() {
        let session = session_with_profile(Some(operator_profile()));
        assert!(session.has_permission("operator"));
    }

    #[test]
    fn test_permission_matches_grant_list() {
        let session = session_with_profile(Some(operator_profile()));
        assert!(session.has_permission("deposits:approve"));
        assert!(!session.has_permission("users:delete"));
    }

    #[test]
    fn test_super_admin_has_every_permission() {
        let mut profile = operator_profile();
        profile.is_super = true;
        let session = session_with_profile(Some(profile));
        assert!(session.has_permission("anything:at-all"));
    }

    #[test]
    fn test_no_profile_means_no_permission() {
        let session = session_with_profile(None);
        assert!(!session.has_permission("operator"));
    }

    #[test]
    fn test_is_authenticated_tracks_stored_token() {
        let credentials: Arc<dyn CredentialStore> = Arc::new(MemoryStore::new());
        let api = Arc::new(ApiClient::new(&ApiConfig::default(), credentials.clone()).unwrap());
        let session = Session::new(api, credentials.clone());

        assert!(!session.is_authenticated());
        credentials.save("tok").unwrap();
        assert!(session.is_authenticated());
        credentials.clear().unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_login_request_omits_absent_otp() {
        let request = LoginRequest {
            email: "op@msq.example".to_string(),
            password: "pw".to_string(),
            otp_code: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("otpCode").is_none());
    }
}
