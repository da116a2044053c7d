//! # Whise Domain
//!
//! Domain types for the Whise real-estate API client.
//!
//! This crate contains:
//! - The error taxonomy and `Result` alias
//! - Client configuration
//! - Credential, scope and token types
//! - Resource request models (estates, contacts)
//! - Webhook event types
//! - API constants
//!
//! ## Architecture
//! - No dependencies on other Whise crates
//! - No I/O; HTTP lives in `whise-client`

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
