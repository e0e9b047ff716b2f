use std::sync::Arc;
use std::time::Duration;

use prism_config::Config;
use prism_core::{HttpClientOptions, http_client};
use secrecy::SecretString;

use crate::{
    adapter::TranscriptionAdapter,
    error::SttError,
    provider::{TranscriptionBackend, gemini::GeminiBackend},
    types::{TranscriptionRequest, TranscriptionResponse},
};

/// Transcription endpoint state shared across requests
pub struct Server {
    adapter: TranscriptionAdapter,
}

impl Server {
    /// Serve transcriptions from an arbitrary backend
    pub fn with_backend(backend: Arc<dyn TranscriptionBackend>) -> Self {
        Self {
            adapter: TranscriptionAdapter::new(backend),
        }
    }

    pub(crate) async fn transcribe(
        &self,
        api_key: &SecretString,
        request: &TranscriptionRequest,
    ) -> crate::error::Result<TranscriptionResponse> {
        self.adapter.transcribe(api_key, request).await
    }
}

/// Builder for constructing the transcription server from configuration
pub struct SttServerBuilder<'a> {
    config: &'a Config,
}

impl<'a> SttServerBuilder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> crate::error::Result<Server> {
        let options = HttpClientOptions {
            egress_proxy: self.config.egress.as_ref().map(|egress| &egress.proxy_url),
            timeout: Some(Duration::from_secs(self.config.stt.timeout_secs)),
        };

        let client = http_client(&options).map_err(|e| SttError::Config(e.to_string()))?;

        tracing::debug!(base_url = %self.config.stt.base_url, "Initializing Gemini transcription backend");

        let backend = GeminiBackend::new(client, self.config.stt.base_url.clone());

        Ok(Server::with_backend(Arc::new(backend)))
    }
}
