//! HTTP client wrapper for the admin backend
//!
//! One configured `reqwest` client for the whole process: fixed base URL,
//! JSON headers, per-request timeout. Every request passes through a single
//! builder that injects `Authorization: Bearer <token>` when a token is
//! present in the credential store, so callers never handle auth headers
//! themselves.
//!
//! Failure semantics are deliberately minimal: no retry, no backoff, no
//! circuit breaking. Network errors propagate unchanged; non-2xx responses
//! become [`MsqAdminError::Api`] carrying the backend's `result` message
//! verbatim, with 401 mapped to [`MsqAdminError::Authentication`].

use crate::auth::CredentialStore;
use crate::config::ApiConfig;
use crate::error::{MsqAdminError, Result};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Configured HTTP client for the admin backend
pub struct ApiClient {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl ApiClient {
    /// Create the client from API configuration and a credential store
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to initialize.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use msqadm::auth::MemoryStore;
    /// use msqadm::config::ApiConfig;
    /// use msqadm::http::ApiClient;
    ///
    /// let api = ApiClient::new(&ApiConfig::default(), Arc::new(MemoryStore::new()));
    /// assert!(api.is_ok());
    /// ```
    pub fn new(config: &ApiConfig, credentials: Arc<dyn CredentialStore>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("msqadm/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MsqAdminError::Config(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!("Initialized API client: base_url={}", config.base_url);

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request for `path`, attaching the bearer token when present
    ///
    /// The token is read from the credential store on every call rather than
    /// cached, so a logout elsewhere in the process takes effect on the very
    /// next request.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.client.request(method, url);

        if let Some(token) = self.credentials.load()? {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        Ok(builder)
    }

    /// GET `path` with the given query parameters, decoding a JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        let response = self.request(Method::GET, path)?.query(query).send().await?;
        decode(response).await
    }

    /// POST a JSON `body` to `path`, decoding a JSON response
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.request(Method::POST, path)?.json(body).send().await?;
        decode(response).await
    }

    /// PUT a JSON `body` to `path`, decoding a JSON response
    pub async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.request(Method::PUT, path)?.json(body).send().await?;
        decode(response).await
    }

    /// DELETE `path`, decoding a JSON response
    pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::DELETE, path)?.send().await?;
        decode(response).await
    }
}

/// Decode a response, mapping non-success statuses to typed errors
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    Err(format_api_error(status, &body).into())
}

/// Map an error status and body to the crate error type
///
/// The backend wraps failure messages as `{"result": "..."}`; that message
/// is surfaced verbatim so operators see exactly what the server said.
fn format_api_error(status: StatusCode, body: &str) -> MsqAdminError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("result").and_then(|r| r.as_str()).map(String::from))
        .unwrap_or_else(|| {
            if body.is_empty() {
                format!("request failed with status {}", status)
            } else {
                body.to_string()
            }
        });

    if status == StatusCode::UNAUTHORIZED {
        MsqAdminError::Authentication(format!(
            "{}. Token may have expired; please re-authenticate with `msqadm login`",
            message
        ))
    } else {
        MsqAdminError::Api {
            status: status.as_u16(),
            message,
        }
    }
}
