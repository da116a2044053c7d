use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, warn};
use whise_domain::{Result, WhiseError};

use crate::errors::TransportError;

/// Thin wrapper over a shared reqwest client.
///
/// Requests are sent exactly once; a response of any status is handed back to
/// the caller and only transport failures become errors.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder.build().map_err(TransportError::from)?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status();
                debug!(%method, %url, %status, "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                warn!(%method, %url, error = %err, "HTTP request failed");
                Err(TransportError::from(err).into())
            }
        }
    }

    /// Send a JSON request and decode the JSON answer.
    ///
    /// A non-success status becomes [`WhiseError::Api`] carrying the body's
    /// `message` (or `context` when absent), the status and the raw body.
    /// An empty success body decodes to `Value::Null`.
    pub async fn send_json(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        body: Option<&Value>,
        context: &str,
    ) -> Result<Value> {
        let mut builder = self.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = self.send(builder).await?;
        let status = response.status();
        let text = response.text().await.map_err(TransportError::from)?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &text, context));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text)
            .map_err(|e| WhiseError::InvalidResponse(format!("{context}: {e}")))
    }
}

fn api_error(status: u16, body: &str, context: &str) -> WhiseError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| context.to_string());

    WhiseError::Api { message, status, body: body.to_string() }
}

/// Builder for [`HttpClient`].
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    timeout: Option<Duration>,
    user_agent: Option<String>,
    default_headers: Option<HeaderMap>,
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let mut builder = ReqwestClient::builder();

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let agent = self
            .user_agent
            .unwrap_or_else(|| concat!("whise-client/", env!("CARGO_PKG_VERSION")).to_string());
        builder = builder.user_agent(agent);

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| {
            WhiseError::Configuration(format!("failed to build HTTP client: {err}"))
        })?;

        Ok(HttpClient { client })
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client() -> HttpClient {
        HttpClient::new().expect("http client")
    }

    #[tokio::test]
    async fn sends_exactly_once_even_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = client();
        let response =
            client.send(client.request(Method::GET, server.uri())).await.expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn builder_applies_default_headers_and_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("x-whise-tenant", "agency"))
            .and(header("user-agent", "whise-tests/1.0"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let mut headers = HeaderMap::new();
        headers.insert("x-whise-tenant", reqwest::header::HeaderValue::from_static("agency"));
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(5))
            .user_agent("whise-tests/1.0")
            .default_headers(headers)
            .build()
            .expect("http client");

        let response =
            client.send(client.request(Method::GET, server.uri())).await.expect("response");

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn send_json_posts_body_and_decodes_answer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/estates/list"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "Page": { "Limit": 1 } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "totalCount": 3 })))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/v1/estates/list", server.uri());
        let body = json!({ "Page": { "Limit": 1 } });
        let value = client()
            .send_json(Method::POST, &url, HeaderMap::new(), Some(&body), "Error fetching estates")
            .await
            .expect("json");

        assert_eq!(value["totalCount"], 3);
    }

    #[tokio::test]
    async fn send_json_uses_server_message_on_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({ "message": "bad filter" })),
            )
            .mount(&server)
            .await;

        let err = client()
            .send_json(Method::POST, &server.uri(), HeaderMap::new(), None, "Error fetching")
            .await
            .unwrap_err();

        match err {
            WhiseError::Api { message, status, body } => {
                assert_eq!(message, "bad filter");
                assert_eq!(status, 400);
                assert!(body.contains("bad filter"));
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn send_json_falls_back_to_context_message() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = client()
            .send_json(Method::DELETE, &server.uri(), HeaderMap::new(), None, "Error deleting")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Error deleting (503): maintenance");
    }

    #[tokio::test]
    async fn empty_success_body_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH")).respond_with(ResponseTemplate::new(204)).mount(&server).await;

        let value = client()
            .send_json(Method::PATCH, &server.uri(), HeaderMap::new(), None, "Error updating")
            .await
            .expect("null body");

        assert_eq!(value, Value::Null);
    }

    #[tokio::test]
    async fn non_json_success_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client()
            .send_json(Method::POST, &server.uri(), HeaderMap::new(), None, "Error fetching")
            .await
            .unwrap_err();

        assert!(matches!(err, WhiseError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so that requests fail with ECONNREFUSED

        let client = client();
        let result = client.send(client.request(Method::GET, format!("http://{addr}"))).await;

        assert!(matches!(result, Err(WhiseError::Network(_))));
    }
}
