//! Credential, scope and token types

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::TOKEN_TTL_SECS;

/// Marketplace account credentials, immutable once constructed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
    base_url: String,
}

impl Credentials {
    /// Build credentials; a trailing slash on `base_url` is dropped.
    pub fn new(username: &str, password: &str, base_url: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path starting with `/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// The (client, office) pair a client token is bound to.
///
/// An office id of `0` carries no meaning on the API side and is normalized
/// to `None`, so `(5, Some(0))` and `(5, None)` are the same scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientScope {
    pub client_id: u64,
    pub office_id: Option<u64>,
}

impl ClientScope {
    pub fn new(client_id: u64, office_id: Option<u64>) -> Self {
        Self { client_id, office_id: office_id.filter(|id| *id != 0) }
    }
}

impl fmt::Display for ClientScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.office_id {
            Some(office_id) => write!(f, "client {} / office {}", self.client_id, office_id),
            None => write!(f, "client {}", self.client_id),
        }
    }
}

/// Request body for the client token endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClientTokenRequest {
    pub client_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_id: Option<u64>,
}

impl From<ClientScope> for ClientTokenRequest {
    fn from(scope: ClientScope) -> Self {
        Self { client_id: scope.client_id, office_id: scope.office_id }
    }
}

/// Request body for the account token endpoint.
#[derive(Serialize)]
pub struct AccountTokenRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Local lifetime applied to every issued token.
pub fn token_ttl() -> Duration {
    Duration::seconds(TOKEN_TTL_SECS)
}

/// Marketplace account bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct AccountToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl AccountToken {
    /// Token issued at `issued_at`, expiring after [`token_ttl`].
    pub fn issued(value: String, issued_at: DateTime<Utc>) -> Self {
        Self { value, expires_at: issued_at + token_ttl() }
    }

    /// Usable only while `now` is strictly before the expiry.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

impl fmt::Debug for AccountToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountToken")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Client-scoped bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
    pub scope: ClientScope,
}

impl ClientToken {
    pub fn issued(value: String, issued_at: DateTime<Utc>, scope: ClientScope) -> Self {
        Self { value, expires_at: issued_at + token_ttl(), scope }
    }

    /// Reusable only when unexpired and bound to exactly `scope`.
    #[must_use]
    pub fn is_valid_for(&self, scope: &ClientScope, now: DateTime<Utc>) -> bool {
        now < self.expires_at && self.scope == *scope
    }
}

impl fmt::Debug for ClientToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientToken")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("scope", &self.scope)
            .finish()
    }
}
