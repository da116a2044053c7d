use async_trait::async_trait;
use reqwest::header::HeaderMap;
use whise_domain::Result;

/// Supplies authenticated request headers to resource clients.
///
/// Implementations handle token caching and refresh.
#[async_trait]
pub trait AuthHeaderProvider: Send + Sync {
    /// Headers carrying the marketplace account token.
    async fn account_headers(&self) -> Result<HeaderMap>;

    /// Headers carrying the client token for the currently selected scope.
    async fn client_headers(&self) -> Result<HeaderMap>;
}
