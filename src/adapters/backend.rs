//! Shared HTTP client for the hosted backend.
//!
//! The auth and database endpoints live under one project URL and share the
//! same `apikey`. After sign-in the auth adapter stores the access token
//! here so database calls run as the signed-in user.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;

use crate::config::BackendConfig;

/// Failure building a backend client.
#[derive(Debug, thiserror::Error)]
pub enum BackendClientError {
    #[error("Hosted backend is not configured")]
    NotConfigured,

    #[error("Failed to create HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Cheaply cloneable handle; clones share the access token.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: SecretString,
    access_token: Arc<RwLock<Option<SecretString>>>,
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl BackendClient {
    pub fn new(
        base_url: impl Into<String>,
        anon_key: SecretString,
        timeout: std::time::Duration,
    ) -> Result<Self, BackendClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http,
            base_url,
            anon_key,
            access_token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, BackendClientError> {
        match (config.base_url(), &config.anon_key) {
            (Some(url), Some(key)) => Self::new(url, key.clone(), config.request_timeout()),
            _ => Err(BackendClientError::NotConfigured),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Builds a request with the `apikey` header and the bearer token of the
    /// signed-in user (the anon key when nobody is signed in).
    pub async fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let bearer = match self.access_token.read().await.as_ref() {
            Some(token) => token.expose_secret().clone(),
            None => self.anon_key.expose_secret().clone(),
        };

        self.http
            .request(method, self.url(path))
            .header("apikey", self.anon_key.expose_secret())
            .bearer_auth(bearer)
    }

    pub async fn set_access_token(&self, token: Option<SecretString>) {
        *self.access_token.write().await = token;
    }

    pub async fn has_access_token(&self) -> bool {
        self.access_token.read().await.is_some()
    }
}

/// Pulls a readable message out of a backend error body.
///
/// The auth endpoints answer with `error_description` or `msg`, the REST
/// endpoints with `message`; anything else is returned verbatim.
pub(crate) fn error_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error_description: Option<String>,
        msg: Option<String>,
        message: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error_description.or(parsed.msg).or(parsed.message))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn client() -> BackendClient {
        BackendClient::new(
            "https://project.example.co/",
            SecretString::new("anon".to_string()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn url_joins_without_double_slash() {
        assert_eq!(
            client().url("/rest/v1/user_profiles"),
            "https://project.example.co/rest/v1/user_profiles"
        );
    }

    #[test]
    fn from_config_requires_url_and_key() {
        let config = BackendConfig::default();
        assert!(matches!(
            BackendClient::from_config(&config),
            Err(BackendClientError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn clones_share_access_token() {
        let a = client();
        let b = a.clone();
        a.set_access_token(Some(SecretString::new("jwt".to_string())))
            .await;
        assert!(b.has_access_token().await);
        b.set_access_token(None).await;
        assert!(!a.has_access_token().await);
    }

    #[tokio::test]
    async fn request_sends_apikey_and_bearer() {
        let c = client();
        let request = c
            .request(reqwest::Method::GET, "/auth/v1/user")
            .await
            .build()
            .unwrap();
        assert_eq!(request.headers()["apikey"], "anon");
        assert_eq!(request.headers()["authorization"], "Bearer anon");

        c.set_access_token(Some(SecretString::new("jwt".to_string())))
            .await;
        let request = c
            .request(reqwest::Method::GET, "/auth/v1/user")
            .await
            .build()
            .unwrap();
        assert_eq!(request.headers()["authorization"], "Bearer jwt");
    }

    #[test]
    fn error_message_prefers_known_fields() {
        assert_eq!(
            error_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(
            error_message(r#"{"code":422,"msg":"User already registered"}"#),
            "User already registered"
        );
        assert_eq!(
            error_message(r#"{"message":"permission denied for table user_profiles"}"#),
            "permission denied for table user_profiles"
        );
        assert_eq!(error_message(" upstream timeout \n"), "upstream timeout");
    }
}
