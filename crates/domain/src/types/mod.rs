//! Domain types and models

pub mod auth;
pub mod contacts;
pub mod estates;
pub mod webhook;

pub use auth::{
    token_ttl, AccountToken, AccountTokenRequest, ClientScope, ClientToken, ClientTokenRequest,
    Credentials,
};
pub use contacts::Contact;
pub use estates::{EstateKind, EstateQuery, Page};
pub use webhook::{WebhookEvent, WebhookEventType};
