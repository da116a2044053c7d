//! Conversions from transport errors into domain errors.

use reqwest::Error as HttpError;
use whise_domain::WhiseError;

/// Error newtype that keeps reqwest conversions on the client side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct TransportError(pub WhiseError);

impl From<TransportError> for WhiseError {
    fn from(value: TransportError) -> Self {
        value.0
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → WhiseError */
/* -------------------------------------------------------------------------- */

impl From<HttpError> for TransportError {
    fn from(err: HttpError) -> Self {
        if err.is_builder() {
            return TransportError(WhiseError::Configuration(format!(
                "failed to build HTTP request: {err}"
            )));
        }

        let context = if err.is_timeout() {
            "HTTP request timed out"
        } else if err.is_connect() {
            "HTTP connection failed"
        } else if err.is_body() || err.is_decode() {
            "HTTP response body could not be read"
        } else {
            "HTTP request failed"
        };

        let message = match err.url() {
            Some(url) => format!("{context} for {url}: {err}"),
            None => format!("{context}: {err}"),
        };

        TransportError(WhiseError::Network(message))
    }
}
