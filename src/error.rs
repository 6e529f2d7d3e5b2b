//! Error types for msqadm
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for msqadm operations
///
/// This enum encompasses all possible errors that can occur while talking to
/// the admin backend, loading configuration, or persisting local state.
/// There is deliberately no retry machinery behind any of these: a failed
/// request surfaces once and the caller decides whether to re-trigger it.
#[derive(Error, Debug)]
pub enum MsqAdminError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The backend answered with a non-success status.
    ///
    /// `message` is the backend's `result` field verbatim when present,
    /// otherwise the raw response body or a generic fallback.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend
        status: u16,
        /// Server-provided message
        message: String,
    },

    /// Authentication errors (401 Unauthorized, failed login, expired token)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// No stored credentials when an operation requires a session
    #[error("Not logged in: {0}")]
    MissingCredentials(String),

    /// Local preference/state storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Locale bundle errors (missing or malformed bundle file)
    #[error("Locale error: {0}")]
    Locale(String),

    /// Invalid timezone identifier supplied by the operator
    #[error("Invalid timezone: {0}")]
    Timezone(String),

    /// Version-check endpoint returned an unparsable version
    #[error("Version check error: {0}")]
    VersionCheck(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

/// Result type alias for msqadm operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = MsqAdminError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_api_error_display() {
        let error = MsqAdminError::Api {
            status: 422,
            message: "duplicated title".to_string(),
        };
        assert_eq!(error.to_string(), "API error (422): duplicated title");
    }

    #[test]
    fn test_authentication_error_display() {
        let error = MsqAdminError::Authentication("token expired".to_string());
        assert_eq!(error.to_string(), "Authentication error: token expired");
    }

    #[test]
    fn test_missing_credentials_display() {
        let error = MsqAdminError::MissingCredentials("run `msqadm login` first".to_string());
        assert_eq!(error.to_string(), "Not logged in: run `msqadm login` first");
    }

    #[test]
    fn test_storage_error_display() {
        let error = MsqAdminError::Storage("preference file unwritable".to_string());
        assert_eq!(
            error.to_string(),
            "Storage error: preference file unwritable"
        );
    }

    #[test]
    fn test_timezone_error_display() {
        let error = MsqAdminError::Timezone("Mars/Olympus".to_string());
        assert_eq!(error.to_string(), "Invalid timezone: Mars/Olympus");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: MsqAdminError = io_error.into();
        assert!(matches!(error, MsqAdminError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "{invalid json}";
        let json_error = serde_json::from_str::<serde_json::Value>(json_str).unwrap_err();
        let error: MsqAdminError = json_error.into();
        assert!(matches!(error, MsqAdminError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: : yaml";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: MsqAdminError = yaml_error.into();
        assert!(matches!(error, MsqAdminError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MsqAdminError>();
    }
}
