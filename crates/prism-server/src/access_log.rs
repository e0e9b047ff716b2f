use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request};
use axum::middleware::Next;
use axum::response::Response;

/// Log every inbound request before it is dispatched
///
/// The client address is only known when the router is served with
/// connect info.
pub async fn access_log_middleware(request: Request, next: Next) -> Response {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string());

    tracing::info!(
        client = client.as_deref().unwrap_or("-"),
        method = %request.method(),
        path = %request.uri().path(),
        "request begin"
    );

    next.run(request).await
}
