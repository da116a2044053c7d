//! Resource clients
//!
//! One method per endpoint. Admin calls are authorized with the account
//! token; everything else uses the client token of the selected scope.

pub mod admin;
pub mod calendars;
pub mod client;
pub mod contacts;
pub mod estates;

pub use admin::AdminClient;
pub use calendars::CalendarsClient;
pub use client::{ApiClient, AuthScope};
pub use contacts::ContactsClient;
pub use estates::EstatesClient;
