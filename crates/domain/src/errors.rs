//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the Whise client
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum WhiseError {
    /// A token endpoint rejected the request or returned an unusable body.
    #[error("{message}")]
    Authentication {
        /// Human-readable description, including status and reason when known
        message: String,
        /// HTTP status returned by the token endpoint, if any
        status: Option<u16>,
    },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// Required scoping information or resource fields are missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An inbound webhook payload is malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A resource endpoint answered with a non-success status.
    #[error("{message} ({status}): {body}")]
    Api {
        /// Server-provided message, or the operation's default message
        message: String,
        /// HTTP status code
        status: u16,
        /// Raw response body for diagnostics
        body: String,
    },

    /// A success response whose body could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl WhiseError {
    /// Authentication failure without an HTTP status (e.g. missing token
    /// field).
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication { message: message.into(), status: None }
    }

    /// Authentication failure carrying the HTTP status and its reason phrase.
    pub fn authentication_status(prefix: &str, status: u16, reason: &str) -> Self {
        let message = if reason.is_empty() {
            format!("{prefix}: {status}")
        } else {
            format!("{prefix}: {status} {reason}")
        };
        Self::Authentication { message, status: Some(status) }
    }

    /// HTTP status attached to the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } => *status,
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this is an authentication failure.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}

/// Result type alias for Whise operations
pub type Result<T> = std::result::Result<T, WhiseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_status_formats_reason() {
        let err = WhiseError::authentication_status("Authentication failed", 401, "Unauthorized");
        assert_eq!(err.to_string(), "Authentication failed: 401 Unauthorized");
        assert_eq!(err.status(), Some(401));
        assert!(err.is_authentication());
    }

    #[test]
    fn authentication_status_without_reason() {
        let err = WhiseError::authentication_status("Client token retrieval failed", 599, "");
        assert_eq!(err.to_string(), "Client token retrieval failed: 599");
    }

    #[test]
    fn api_error_includes_body() {
        let err = WhiseError::Api {
            message: "Error fetching estates".into(),
            status: 500,
            body: r#"{"message":"boom"}"#.into(),
        };
        assert_eq!(err.to_string(), r#"Error fetching estates (500): {"message":"boom"}"#);
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_authentication());
    }

    #[test]
    fn serializes_with_type_tag() {
        let err = WhiseError::Configuration("Client ID is required".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "Configuration");
    }
}
