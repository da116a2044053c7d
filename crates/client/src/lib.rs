//! # Whise Client
//!
//! Async client for the Whise real-estate API.
//!
//! This crate contains:
//! - HTTP transport over `reqwest`
//! - Account and client token management
//! - Admin, estate, contact and calendar resource clients
//! - Webhook dispatching, with an `axum` endpoint
//! - Configuration loading from the environment or files
//!
//! ## Architecture
//! - Depends on `whise-domain` for types and errors
//! - Resource clients reach the token manager through
//!   [`auth::AuthHeaderProvider`]

pub mod api;
pub mod auth;
pub mod client;
pub mod clock;
pub mod config;
pub mod errors;
pub mod http;
pub mod webhook;

// Re-export commonly used items
pub use api::{AdminClient, CalendarsClient, ContactsClient, EstatesClient};
pub use auth::{AuthHeaderProvider, TokenManager};
pub use client::{WhiseClient, WhiseClientBuilder};
pub use webhook::WebhookDispatcher;
