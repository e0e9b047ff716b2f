use std::sync::Arc;

use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use prism_config::Config;
use prism_core::{HttpClientOptions, http_client};
use prism_proxy::{DispatchTarget, Forwarder, PathRouter};

/// Per-request entry point shared by every inbound path
#[derive(Clone)]
pub struct Dispatcher {
    router: Arc<PathRouter>,
    forwarder: Forwarder,
    stt: Arc<stt::Server>,
}

impl Dispatcher {
    /// Build the dispatcher from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the outbound client or the transcription
    /// backend cannot be initialized
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = http_client(&HttpClientOptions {
            egress_proxy: config.egress.as_ref().map(|egress| &egress.proxy_url),
            timeout: None,
        })?;

        Ok(Self::new(
            PathRouter::new(&config.upstream),
            Forwarder::new(client),
            stt::build_server(config)?,
        ))
    }

    pub fn new(router: PathRouter, forwarder: Forwarder, stt: Arc<stt::Server>) -> Self {
        Self {
            router: Arc::new(router),
            forwarder,
            stt,
        }
    }

    async fn dispatch(&self, request: Request) -> Response {
        let path = request.uri().path().to_owned();

        match self.router.dispatch_target(&path) {
            DispatchTarget::Transcription => {
                tracing::debug!(%path, "dispatching to transcription adapter");
                stt::handle(Arc::clone(&self.stt), request).await
            }
            DispatchTarget::Native | DispatchTarget::Compatible => {
                let decision = self.router.route(&path);
                let upstream = self.router.upstream_url(decision.target);

                match self.forwarder.forward(request, upstream, &decision).await {
                    Ok(response) => response,
                    Err(err) => err.into_response(),
                }
            }
        }
    }
}

/// Fallback handler receiving every request no explicit route claimed
pub async fn dispatch_handler(State(dispatcher): State<Dispatcher>, request: Request) -> Response {
    dispatcher.dispatch(request).await
}
