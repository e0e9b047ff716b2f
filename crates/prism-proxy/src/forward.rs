use axum::body::{Body, HttpBody};
use axum::extract::Request;
use axum::response::Response;
use http::{HeaderMap, HeaderName, header};
use reqwest::Client;
use url::Url;

use crate::error::ProxyError;
use crate::route::RouteDecision;

/// Connection-scoped headers that must not cross the proxy
static HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Streams requests to an upstream and streams the answer back
///
/// Neither body is buffered. Dropping the returned future (for instance
/// when the caller disconnects) aborts the outbound exchange.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client,
}

impl Forwarder {
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// Relay `request` to `upstream`, replacing scheme, host and path
    pub async fn forward(
        &self,
        request: Request,
        upstream: &Url,
        decision: &RouteDecision,
    ) -> crate::Result<Response> {
        let (parts, body) = request.into_parts();

        let url = outbound_url(upstream, &decision.rewritten_path, parts.uri.query());

        let mut headers = parts.headers;
        strip_hop_by_hop(&mut headers);
        headers.remove(header::HOST);

        tracing::debug!(
            method = %parts.method,
            upstream = ?decision.target,
            url = %url,
            "forwarding request upstream"
        );

        let mut outbound = self.client.request(parts.method, url).headers(headers);
        if !body.is_end_stream() {
            outbound = outbound.body(reqwest::Body::wrap_stream(body.into_data_stream()));
        }

        let upstream_response = outbound.send().await.map_err(|e| {
            tracing::error!(upstream = ?decision.target, error = %e, "upstream request failed");
            ProxyError::UpstreamFailure(e.to_string())
        })?;

        let status = upstream_response.status();
        tracing::debug!(upstream = ?decision.target, status = %status, "upstream responded");

        let mut response_headers = upstream_response.headers().clone();
        strip_hop_by_hop(&mut response_headers);

        let mut response = Response::new(Body::from_stream(upstream_response.bytes_stream()));
        *response.status_mut() = status;
        *response.headers_mut() = response_headers;

        Ok(response)
    }
}

/// Build the outbound URL, keeping the inbound query string verbatim
fn outbound_url(upstream: &Url, path: &str, query: Option<&str>) -> Url {
    let mut url = upstream.clone();
    url.set_path(path);
    url.set_query(query);
    url
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    // Headers named by `Connection` are connection-scoped as well
    let named: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in named.iter().chain(HOP_BY_HOP.iter()) {
        headers.remove(name);
    }
}
