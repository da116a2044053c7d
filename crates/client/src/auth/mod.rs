//! Token acquisition and authenticated headers.

pub mod provider;
pub mod token_manager;

pub use provider::AuthHeaderProvider;
pub use token_manager::TokenManager;
