//! Top-level client wiring the token manager, resource clients and webhook
//! dispatcher together.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tracing::info;
use whise_domain::{ClientConfig, ClientScope, Result, WhiseError};

use crate::api::{AdminClient, ApiClient, CalendarsClient, ContactsClient, EstatesClient};
use crate::auth::TokenManager;
use crate::clock::{Clock, SystemClock};
use crate::http::HttpClient;
use crate::webhook::{self, WebhookDispatcher};

/// Entry point of the library.
///
/// All resource clients share one HTTP connection pool and one
/// [`TokenManager`], so selecting a client with
/// [`set_client`](Self::set_client) applies to every subsequent estate,
/// contact and calendar call.
///
/// ```no_run
/// # async fn demo() -> whise_domain::Result<()> {
/// use whise_client::WhiseClient;
/// use whise_domain::{ClientConfig, EstateQuery};
///
/// let whise = WhiseClient::new(ClientConfig::new("user", "secret"))?;
/// whise.set_client(1234, None).await?;
/// let estates = whise.estates().list(&EstateQuery::new().page(20, 0)).await?;
/// # let _ = estates;
/// # Ok(())
/// # }
/// ```
pub struct WhiseClient {
    tokens: Arc<TokenManager>,
    admin: AdminClient,
    estates: EstatesClient,
    contacts: ContactsClient,
    calendars: CalendarsClient,
    webhooks: Arc<WebhookDispatcher>,
}

impl WhiseClient {
    /// Build a client from `config` using the system clock.
    ///
    /// # Errors
    /// Returns `WhiseError::Configuration` if the configuration is invalid or
    /// the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Build a client from the environment or a config file (see
    /// [`crate::config::load`]).
    pub fn from_env() -> Result<Self> {
        Self::new(crate::config::load()?)
    }

    pub fn builder() -> WhiseClientBuilder {
        WhiseClientBuilder::default()
    }

    /// Select the client (and optionally office) used by client-scoped
    /// calls, fetching a token for it right away.
    pub async fn set_client(&self, client_id: u64, office_id: Option<u64>) -> Result<()> {
        self.tokens.set_client_scope(client_id, office_id).await
    }

    /// Currently selected client scope.
    pub async fn current_client(&self) -> Option<ClientScope> {
        self.tokens.current_scope().await
    }

    pub fn tokens(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    pub fn admin(&self) -> &AdminClient {
        &self.admin
    }

    pub fn estates(&self) -> &EstatesClient {
        &self.estates
    }

    pub fn contacts(&self) -> &ContactsClient {
        &self.contacts
    }

    pub fn calendars(&self) -> &CalendarsClient {
        &self.calendars
    }

    pub fn webhooks(&self) -> &Arc<WebhookDispatcher> {
        &self.webhooks
    }

    /// Axum router feeding deliveries into [`webhooks`](Self::webhooks).
    pub fn webhook_router(&self) -> Router {
        webhook::router(self.webhooks.clone())
    }
}

/// Builder for [`WhiseClient`].
#[derive(Default)]
pub struct WhiseClientBuilder {
    config: Option<ClientConfig>,
    clock: Option<Arc<dyn Clock>>,
    user_agent: Option<String>,
}

impl WhiseClientBuilder {
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Time source for token expiry and webhook timestamps.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<WhiseClient> {
        let config = self.config.ok_or_else(|| {
            WhiseError::Configuration("Client configuration is required".into())
        })?;
        let credentials = config.credentials()?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let mut http = HttpClient::builder();
        if let Some(secs) = config.timeout_secs {
            http = http.timeout(Duration::from_secs(secs));
        }
        if let Some(agent) = self.user_agent {
            http = http.user_agent(agent);
        }
        let http = http.build()?;

        let tokens = Arc::new(
            TokenManager::new(credentials.clone(), http.clone()).with_clock(clock.clone()),
        );
        let api = ApiClient::new(http, tokens.clone(), credentials.base_url());

        info!(base_url = %credentials.base_url(), "Whise client initialized");

        Ok(WhiseClient {
            tokens,
            admin: AdminClient::new(api.clone()),
            estates: EstatesClient::new(api.clone()),
            contacts: ContactsClient::new(api.clone()),
            calendars: CalendarsClient::new(api),
            webhooks: Arc::new(WebhookDispatcher::new().with_clock(clock)),
        })
    }
}
