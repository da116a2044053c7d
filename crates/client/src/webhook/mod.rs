//! Inbound webhook handling.

pub mod dispatcher;
pub mod router;

pub use dispatcher::{Listener, WebhookDispatcher};
pub use router::router;
