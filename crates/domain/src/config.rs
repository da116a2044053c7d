//! Client configuration

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_BASE_URL;
use crate::errors::{Result, WhiseError};
use crate::types::Credentials;

/// Connection settings for the Whise API client
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Marketplace account username
    pub username: String,
    /// Marketplace account password
    pub password: String,
    /// API base URL, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Optional per-request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl ClientConfig {
    /// Configuration pointing at the production API.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }

    /// Override the API base URL (useful for sandboxes and mock servers).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set a per-request timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Check that credentials are present and the base URL is absolute.
    ///
    /// # Errors
    /// Returns `WhiseError::Configuration` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(WhiseError::Configuration("Username and password are required".into()));
        }

        let parsed = url::Url::parse(&self.base_url).map_err(|e| {
            WhiseError::Configuration(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(WhiseError::Configuration(format!(
                "Unsupported base URL scheme: {}",
                parsed.scheme()
            )));
        }

        if self.timeout_secs == Some(0) {
            return Err(WhiseError::Configuration("Timeout must be greater than zero".into()));
        }

        Ok(())
    }

    /// Validated credentials derived from this configuration.
    ///
    /// # Errors
    /// Returns `WhiseError::Configuration` if [`validate`](Self::validate)
    /// fails.
    pub fn credentials(&self) -> Result<Credentials> {
        self.validate()?;
        Ok(Credentials::new(&self.username, &self.password, &self.base_url))
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
