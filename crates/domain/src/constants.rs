//! Client constants
//!
//! Centralized location for endpoint paths and token lifetimes used
//! throughout the client.

/// Production base URL of the Whise API.
pub const DEFAULT_BASE_URL: &str = "https://api.whise.eu";

/// Local token lifetime in seconds (23 hours). The server honours tokens for
/// 24 hours; the hour of slack keeps a cached token from expiring mid-request.
pub const TOKEN_TTL_SECS: i64 = 23 * 60 * 60;

/// Marketplace account token endpoint.
pub const ACCOUNT_TOKEN_PATH: &str = "/token";

/// Client (and optional office) scoped token endpoint.
pub const CLIENT_TOKEN_PATH: &str = "/v1/admin/clients/token";

/// Name under which catch-all webhook listeners are registered.
pub const WEBHOOK_CATCH_ALL: &str = "all";
