//! Mock upstream that echoes what it received
//!
//! Stands in for either API surface. The JSON reply describes the
//! request exactly as the upstream saw it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use tokio_util::sync::CancellationToken;

/// Status the mock answers with when the request carries this header
pub const STATUS_HEADER: &str = "x-mock-status";

pub struct MockUpstream {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockUpstreamState>,
}

struct MockUpstreamState {
    request_count: AtomicU32,
}

impl MockUpstream {
    pub async fn start() -> anyhow::Result<Self> {
        let state = Arc::new(MockUpstreamState {
            request_count: AtomicU32::new(0),
        });

        let app = Router::new().fallback(echo).with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL with an optional path, e.g. `base_url("/v1beta/openai")`
    pub fn base_url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub fn authority(&self) -> String {
        self.addr.to_string()
    }

    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned)
}

async fn echo(State(state): State<Arc<MockUpstreamState>>, request: Request) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let (parts, body) = request.into_parts();
    let body = to_bytes(body, usize::MAX).await.unwrap_or_default();

    let status = header(&parts.headers, STATUS_HEADER)
        .and_then(|code| code.parse::<u16>().ok())
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::OK);

    let reply = serde_json::json!({
        "method": parts.method.as_str(),
        "path": parts.uri.path(),
        "query": parts.uri.query(),
        "host": header(&parts.headers, "host"),
        "authorization": header(&parts.headers, "authorization"),
        "connection": header(&parts.headers, "connection"),
        "body": String::from_utf8_lossy(&body),
    });

    (
        status,
        [("content-type", "application/json"), ("x-mock", "upstream")],
        Body::from(reply.to_string()),
    )
        .into_response()
}
