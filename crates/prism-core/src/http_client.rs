use std::time::Duration;

use reqwest::{Client, Proxy};
use thiserror::Error;
use url::Url;

/// Failure to construct an outbound HTTP client
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// The egress proxy URL was rejected by reqwest
    #[error("invalid egress proxy {url}: {source}")]
    Proxy {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The client builder failed
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// Options for an outbound client
#[derive(Debug, Clone, Default)]
pub struct HttpClientOptions<'a> {
    /// Egress proxy applied to every request made by the client
    pub egress_proxy: Option<&'a Url>,
    /// Total request timeout; `None` leaves streaming responses unbounded
    pub timeout: Option<Duration>,
}

/// Build an outbound client for upstream and backend calls
///
/// Redirects are not followed so that a forwarded request observes the
/// upstream's own redirect responses.
///
/// # Errors
///
/// Returns an error if the egress proxy URL is rejected or the client
/// cannot be built
pub fn http_client(options: &HttpClientOptions<'_>) -> Result<Client, HttpClientError> {
    let mut builder = Client::builder()
        .pool_idle_timeout(Some(Duration::from_secs(5)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .redirect(reqwest::redirect::Policy::none());

    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }

    if let Some(proxy_url) = options.egress_proxy {
        let proxy = Proxy::all(proxy_url.as_str()).map_err(|source| HttpClientError::Proxy {
            url: proxy_url.to_string(),
            source,
        })?;
        builder = builder.proxy(proxy);
    }

    builder.build().map_err(HttpClientError::Build)
}
