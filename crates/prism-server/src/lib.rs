#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod access_log;
mod dispatch;
mod health;

use std::net::SocketAddr;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use prism_config::Config;
use tower_http::trace::TraceLayer;

pub use dispatch::Dispatcher;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the outbound client or the transcription
    /// backend fails to initialize
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let dispatcher = Dispatcher::from_config(config)?;
        Ok(Self::with_dispatcher(config, dispatcher))
    }

    /// Build the server around an existing dispatcher
    pub fn with_dispatcher(config: &Config, dispatcher: Dispatcher) -> Self {
        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // Everything else goes through the dispatcher
        let mut app = app.fallback(dispatch::dispatch_handler).with_state(dispatcher);

        // Apply middleware layers (innermost first)

        // Multipart upload limit; forwarded bodies are streamed and unaffected
        app = app.layer(DefaultBodyLimit::max(config.stt.max_upload_bytes));

        // Access log
        app = app.layer(axum::middleware::from_fn(access_log::access_log_middleware));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        Self {
            router: app,
            listen_address: config.server.listen_address(),
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(
            listener,
            self.router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            tracing::info!("graceful shutdown initiated");
        })
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;

    fn router(config: &Config) -> Router {
        Server::new(config).unwrap().into_router()
    }

    #[tokio::test]
    async fn health_route_answers_ok() {
        let response = router(&Config::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn transcription_without_token_is_unauthorized() {
        let response = router(&Config::default())
            .oneshot(
                Request::post("/v1/audio/transcriptions")
                    .header("content-type", "multipart/form-data; boundary=x")
                    .body(Body::from("--x--\r\n"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Unauthorized");
    }

    #[tokio::test]
    async fn unreachable_upstream_is_bad_gateway() {
        let mut config = Config::default();
        config.upstream.native_url = "http://127.0.0.1:1".parse().unwrap();

        let response = router(&config)
            .oneshot(Request::get("/v1beta/models").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
