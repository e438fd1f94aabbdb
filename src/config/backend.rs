//! Hosted backend configuration (auth + database REST endpoints)

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Connection settings for the hosted backend.
///
/// When `url` is unset the application runs against the in-memory adapters.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Project base URL, e.g. `https://abc.example.co`
    pub url: Option<String>,

    /// Public anon key sent as the `apikey` header
    pub anon_key: Option<SecretString>,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_request_timeout() -> u64 {
    10
}

impl BackendConfig {
    /// True when a hosted backend should be used.
    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> Option<&str> {
        self.url.as_deref().map(|url| url.trim_end_matches('/'))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.request_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        let Some(url) = &self.url else {
            return Ok(());
        };

        if !url.starts_with("https://") && !url.starts_with("http://") {
            return Err(ValidationError::InvalidBackendUrl);
        }
        if self.anon_key.is_none() {
            return Err(ValidationError::MissingRequired("BACKEND__ANON_KEY"));
        }

        Ok(())
    }
}
