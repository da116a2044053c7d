//! HTTP transport shared by the token manager and resource clients.

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
