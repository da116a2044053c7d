//! Authenticated JSON calls shared by the resource clients

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument};
use whise_domain::{Result, WhiseError};

use crate::auth::AuthHeaderProvider;
use crate::http::HttpClient;

/// Which token authorizes a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScope {
    /// Marketplace account token (admin endpoints)
    Account,
    /// Client token for the selected scope (estates, contacts, calendars)
    Client,
}

/// Sends one authenticated request per call and returns the decoded body.
#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    auth: Arc<dyn AuthHeaderProvider>,
    base_url: String,
}

impl ApiClient {
    pub fn new(http: HttpClient, auth: Arc<dyn AuthHeaderProvider>, base_url: &str) -> Self {
        Self { http, auth, base_url: base_url.trim_end_matches('/').to_string() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute a request against `{base_url}{path}`.
    ///
    /// # Errors
    ///
    /// Header errors from the auth provider are returned unchanged. A
    /// non-success response becomes [`WhiseError::Api`] whose message falls
    /// back to `context`.
    #[instrument(skip(self, body, context), fields(path = %path))]
    pub async fn call(
        &self,
        scope: AuthScope,
        method: Method,
        path: &str,
        body: Option<&Value>,
        context: &str,
    ) -> Result<Value> {
        let headers = match scope {
            AuthScope::Account => self.auth.account_headers().await?,
            AuthScope::Client => self.auth.client_headers().await?,
        };

        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, method = %method, "API request");

        let value = self.http.send_json(method, &url, headers, body, context).await?;

        info!(path = %path, "API request successful");
        Ok(value)
    }

    /// POST a serializable body.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        scope: AuthScope,
        path: &str,
        body: &T,
        context: &str,
    ) -> Result<Value> {
        let body = to_body(body)?;
        self.call(scope, Method::POST, path, Some(&body), context).await
    }
}

pub(crate) fn to_body<T: Serialize + ?Sized>(body: &T) -> Result<Value> {
    serde_json::to_value(body)
        .map_err(|e| WhiseError::Configuration(format!("Failed to serialize body: {e}")))
}

/// Object holding only `LanguageId`, or empty when no language is given.
pub(crate) fn language_body(language_id: Option<&str>) -> Value {
    let mut body = serde_json::Map::new();
    if let Some(language_id) = language_id.filter(|id| !id.is_empty()) {
        body.insert("LanguageId".into(), Value::from(language_id));
    }
    Value::Object(body)
}
