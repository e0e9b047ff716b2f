//! Shared building blocks for the prism gateway crates

mod auth;
mod error;
mod http_client;

pub use auth::{AuthError, bearer_token};
pub use error::HttpError;
pub use http_client::{HttpClientError, HttpClientOptions, http_client};
