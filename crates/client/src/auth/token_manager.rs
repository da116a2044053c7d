//! Account and client token lifecycle
//!
//! Holds at most one account token and one client token. Both are fetched
//! lazily and reused until they expire; the client token is also discarded
//! whenever the requested scope differs from the one it was issued for.
//!
//! Each cache slot sits behind an async mutex that stays locked for the
//! duration of a refresh, so concurrent callers share a single fetch. The
//! client slot is always locked before the account slot.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use whise_domain::constants::{ACCOUNT_TOKEN_PATH, CLIENT_TOKEN_PATH};
use whise_domain::{
    AccountToken, AccountTokenRequest, ClientScope, ClientToken, ClientTokenRequest, Credentials,
    Result, WhiseError,
};

use super::provider::AuthHeaderProvider;
use crate::clock::{Clock, SystemClock};
use crate::errors::TransportError;
use crate::http::HttpClient;

#[derive(Debug, Default)]
struct ClientSlot {
    token: Option<ClientToken>,
    scope: Option<ClientScope>,
}

/// Caches the account token and a single client token.
pub struct TokenManager {
    http: HttpClient,
    credentials: Credentials,
    clock: Arc<dyn Clock>,
    account: Mutex<Option<AccountToken>>,
    client: Mutex<ClientSlot>,
}

impl TokenManager {
    /// Create a manager using the system clock.
    pub fn new(credentials: Credentials, http: HttpClient) -> Self {
        Self {
            http,
            credentials,
            clock: Arc::new(SystemClock),
            account: Mutex::new(None),
            client: Mutex::new(ClientSlot::default()),
        }
    }

    /// Replace the time source used for expiry checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Return a valid account token, fetching one if none is cached or the
    /// cached one has expired.
    ///
    /// # Errors
    ///
    /// * [`WhiseError::Authentication`] when the endpoint rejects the
    ///   credentials or answers without a `token` field
    /// * [`WhiseError::Network`] when no response is received
    #[instrument(skip(self), fields(username = %self.credentials.username()))]
    pub async fn acquire_account_token(&self) -> Result<String> {
        let mut slot = self.account.lock().await;

        if let Some(token) = slot.as_ref() {
            if token.is_valid_at(self.clock.now()) {
                debug!("using cached account token");
                return Ok(token.value.clone());
            }
            debug!(expired_at = %token.expires_at, "account token expired");
        }

        let token = self.fetch_account_token().await?;
        let value = token.value.clone();
        info!(expires_at = %token.expires_at, "account token issued");
        *slot = Some(token);

        Ok(value)
    }

    /// Return a client token for `(client_id, office_id)`.
    ///
    /// The cached token is reused only when it is unexpired and was issued
    /// for exactly this scope. A freshly issued token also becomes the stored
    /// scope used by [`build_client_headers`](Self::build_client_headers).
    #[instrument(skip(self))]
    pub async fn acquire_client_token(
        &self,
        client_id: u64,
        office_id: Option<u64>,
    ) -> Result<String> {
        let scope = ClientScope::new(client_id, office_id);
        let mut slot = self.client.lock().await;
        self.client_token_in(&mut slot, scope).await
    }

    /// Switch to a new client scope.
    ///
    /// The cached client token is dropped and the new scope recorded before a
    /// fresh token is requested, so the scope sticks even if that request
    /// fails.
    #[instrument(skip(self))]
    pub async fn set_client_scope(&self, client_id: u64, office_id: Option<u64>) -> Result<()> {
        let scope = ClientScope::new(client_id, office_id);
        let mut slot = self.client.lock().await;

        slot.token = None;
        slot.scope = Some(scope);
        info!(%scope, "client scope switched");

        let token = self.fetch_client_token(scope).await?;
        slot.token = Some(token);

        Ok(())
    }

    /// JSON headers authorized with the account token.
    pub async fn build_account_headers(&self) -> Result<HeaderMap> {
        let token = self.acquire_account_token().await?;
        bearer_headers(&token)
    }

    /// JSON headers authorized with a client token.
    ///
    /// Each id falls back to the stored scope when not given. Without any
    /// client id this fails before touching the network. The fallback is
    /// resolved under the same lock as the token lookup, so a concurrent
    /// scope switch is never overwritten with the scope it replaced.
    pub async fn build_client_headers(
        &self,
        client_id: Option<u64>,
        office_id: Option<u64>,
    ) -> Result<HeaderMap> {
        let mut slot = self.client.lock().await;
        let stored = slot.scope;

        let client_id = client_id
            .filter(|id| *id != 0)
            .or(stored.map(|scope| scope.client_id))
            .ok_or_else(|| {
                WhiseError::Configuration("Client ID is required for client requests".into())
            })?;
        let office_id =
            office_id.filter(|id| *id != 0).or(stored.and_then(|scope| scope.office_id));

        let token = self.client_token_in(&mut slot, ClientScope::new(client_id, office_id)).await?;
        bearer_headers(&token)
    }

    /// Scope recorded by the last successful client token fetch or scope
    /// switch.
    pub async fn current_scope(&self) -> Option<ClientScope> {
        self.client.lock().await.scope
    }

    /// Drop both cached tokens. The stored scope is kept.
    pub async fn invalidate(&self) {
        let mut client = self.client.lock().await;
        let mut account = self.account.lock().await;
        client.token = None;
        *account = None;
        debug!("token caches cleared");
    }

    /// Reuse or fetch the client token for `scope`; the caller holds the
    /// client slot.
    async fn client_token_in(&self, slot: &mut ClientSlot, scope: ClientScope) -> Result<String> {
        if let Some(token) = slot.token.as_ref() {
            if token.is_valid_for(&scope, self.clock.now()) {
                debug!(%scope, "using cached client token");
                return Ok(token.value.clone());
            }
        }

        let token = self.fetch_client_token(scope).await?;
        let value = token.value.clone();
        info!(%scope, expires_at = %token.expires_at, "client token issued");
        slot.token = Some(token);
        slot.scope = Some(scope);

        Ok(value)
    }

    async fn fetch_account_token(&self) -> Result<AccountToken> {
        let url = self.credentials.url(ACCOUNT_TOKEN_PATH);
        let body = AccountTokenRequest {
            username: self.credentials.username(),
            password: self.credentials.password(),
        };

        let request = self.http.request(Method::POST, &url).json(&body);
        let response = self.http.send(request).await?;
        let status = response.status();

        if !status.is_success() {
            warn!(status = status.as_u16(), "account token request rejected");
            return Err(WhiseError::authentication_status(
                "Authentication failed",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }

        let value = extract_token(response)
            .await?
            .ok_or_else(|| WhiseError::authentication("No token returned from authentication"))?;

        Ok(AccountToken::issued(value, self.clock.now()))
    }

    async fn fetch_client_token(&self, scope: ClientScope) -> Result<ClientToken> {
        let account_token = self.acquire_account_token().await?;

        let url = self.credentials.url(CLIENT_TOKEN_PATH);
        let request = self
            .http
            .request(Method::POST, &url)
            .bearer_auth(account_token)
            .json(&ClientTokenRequest::from(scope));
        let response = self.http.send(request).await?;
        let status = response.status();

        if !status.is_success() {
            warn!(%scope, status = status.as_u16(), "client token request rejected");
            return Err(WhiseError::authentication_status(
                "Client token retrieval failed",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }

        let value = extract_token(response)
            .await?
            .ok_or_else(|| WhiseError::authentication("No client token returned"))?;

        Ok(ClientToken::issued(value, self.clock.now(), scope))
    }
}

#[async_trait]
impl AuthHeaderProvider for TokenManager {
    async fn account_headers(&self) -> Result<HeaderMap> {
        self.build_account_headers().await
    }

    async fn client_headers(&self) -> Result<HeaderMap> {
        self.build_client_headers(None, None).await
    }
}

/// Pull a non-empty `token` string out of a token endpoint response.
///
/// Bodies that are not JSON objects count as "no token".
async fn extract_token(response: Response) -> Result<Option<String>> {
    let bytes = response.bytes().await.map_err(TransportError::from)?;

    let token = serde_json::from_slice::<Value>(&bytes)
        .ok()
        .and_then(|body| body.get("token").and_then(Value::as_str).map(str::to_string))
        .filter(|token| !token.is_empty());

    Ok(token)
}

fn bearer_headers(token: &str) -> Result<HeaderMap> {
    let mut authorization = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
        WhiseError::authentication("Token contains characters not allowed in a header")
    })?;
    authorization.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(AUTHORIZATION, authorization);
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::clock::MockClock;

    fn manager(server: &MockServer) -> TokenManager {
        let credentials = Credentials::new("user", "secret", &server.uri());
        TokenManager::new(credentials, HttpClient::new().expect("http client"))
    }

    async fn mount_account_token(server: &MockServer, token: &str, times: u64) {
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_json(json!({ "username": "user", "password": "secret" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": token })))
            .expect(times)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn account_headers_carry_bearer_token() {
        let server = MockServer::start().await;
        mount_account_token(&server, "acc-1", 1).await;

        let headers = manager(&server).build_account_headers().await.expect("headers");

        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[AUTHORIZATION], "Bearer acc-1");
        assert!(headers[AUTHORIZATION].is_sensitive());
    }

    #[tokio::test]
    async fn rejected_credentials_report_status_and_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = manager(&server).acquire_account_token().await.unwrap_err();

        assert_eq!(err.to_string(), "Authentication failed: 401 Unauthorized");
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn non_json_token_body_counts_as_missing_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = manager(&server).acquire_account_token().await.unwrap_err();

        assert_eq!(err, WhiseError::authentication("No token returned from authentication"));
    }

    #[tokio::test]
    async fn client_token_request_uses_account_token() {
        let server = MockServer::start().await;
        mount_account_token(&server, "acc-1", 1).await;
        Mock::given(method("POST"))
            .and(path("/v1/admin/clients/token"))
            .and(header("authorization", "Bearer acc-1"))
            .and(body_json(json!({ "ClientId": 5, "OfficeId": 10 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "cli-1" })))
            .expect(1)
            .mount(&server)
            .await;

        let manager = manager(&server);
        let token = manager.acquire_client_token(5, Some(10)).await.expect("client token");

        assert_eq!(token, "cli-1");
        assert_eq!(manager.current_scope().await, Some(ClientScope::new(5, Some(10))));
    }

    #[tokio::test]
    async fn zero_office_is_not_sent() {
        let server = MockServer::start().await;
        mount_account_token(&server, "acc-1", 1).await;
        Mock::given(method("POST"))
            .and(path("/v1/admin/clients/token"))
            .and(body_json(json!({ "ClientId": 5 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "cli-1" })))
            .expect(1)
            .mount(&server)
            .await;

        let manager = manager(&server);
        manager.acquire_client_token(5, Some(0)).await.expect("client token");
        manager.acquire_client_token(5, None).await.expect("cached client token");
    }

    #[tokio::test]
    async fn client_token_rejection_is_authentication_error() {
        let server = MockServer::start().await;
        mount_account_token(&server, "acc-1", 1).await;
        Mock::given(method("POST"))
            .and(path("/v1/admin/clients/token"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = manager(&server).acquire_client_token(5, None).await.unwrap_err();

        assert_eq!(err.to_string(), "Client token retrieval failed: 403 Forbidden");
    }

    #[tokio::test]
    async fn failed_scope_switch_keeps_new_scope() {
        let server = MockServer::start().await;
        mount_account_token(&server, "acc-1", 1).await;
        Mock::given(method("POST"))
            .and(path("/v1/admin/clients/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let manager = manager(&server);
        let err = manager.set_client_scope(8, Some(3)).await.unwrap_err();

        assert_eq!(err, WhiseError::authentication("No client token returned"));
        assert_eq!(manager.current_scope().await, Some(ClientScope::new(8, Some(3))));
    }

    #[tokio::test]
    async fn client_headers_fall_back_to_stored_office() {
        let server = MockServer::start().await;
        mount_account_token(&server, "acc-1", 1).await;
        Mock::given(method("POST"))
            .and(path("/v1/admin/clients/token"))
            .and(body_json(json!({ "ClientId": 5, "OfficeId": 10 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "cli-1" })))
            .expect(1)
            .mount(&server)
            .await;

        let manager = manager(&server);
        manager.set_client_scope(5, Some(10)).await.expect("scope");
        let headers = manager.build_client_headers(Some(5), None).await.expect("headers");

        assert_eq!(headers[AUTHORIZATION], "Bearer cli-1");
    }

    #[tokio::test]
    async fn invalidate_forces_refetch_but_keeps_scope() {
        let server = MockServer::start().await;
        mount_account_token(&server, "acc-1", 2).await;
        Mock::given(method("POST"))
            .and(path("/v1/admin/clients/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "cli-1" })))
            .expect(2)
            .mount(&server)
            .await;

        let manager = manager(&server);
        manager.set_client_scope(5, None).await.expect("scope");
        manager.invalidate().await;

        assert_eq!(manager.current_scope().await, Some(ClientScope::new(5, None)));
        manager.build_client_headers(None, None).await.expect("headers");
    }

    #[tokio::test]
    async fn client_token_expires_with_clock() {
        let server = MockServer::start().await;
        mount_account_token(&server, "acc-1", 2).await;
        Mock::given(method("POST"))
            .and(path("/v1/admin/clients/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "cli-1" })))
            .expect(2)
            .mount(&server)
            .await;

        let clock = MockClock::new();
        let manager = manager(&server).with_clock(Arc::new(clock.clone()));

        manager.acquire_client_token(5, None).await.expect("first");
        clock.advance_hours(22);
        manager.acquire_client_token(5, None).await.expect("cached");
        clock.advance_hours(1);
        manager.acquire_client_token(5, None).await.expect("refetched");
    }
}
