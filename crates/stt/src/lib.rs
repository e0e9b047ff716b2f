//! Audio transcription endpoint backed by a generative model
//!
//! Accepts `OpenAI`-style multipart uploads, asks the backend for a
//! timecoded JSON transcript and reshapes it into `json`, `verbose_json`,
//! `text` or `srt` responses.

#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod adapter;
mod error;
mod provider;
mod render;
mod request;
mod server;
pub mod timecode;
mod types;

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};

pub use adapter::TranscriptionAdapter;
pub use error::{Result, SttError};
pub use provider::{GenerateRequest, TranscriptionBackend};
pub use render::{ResponseFormat, render};
pub use request::ExtractMultipart;
pub use server::{Server, SttServerBuilder};
pub use types::{Segment, TranscriptionRequest, TranscriptionResponse, Word};

/// Build the transcription server from configuration
///
/// # Errors
///
/// Returns an error if the server fails to initialize
pub fn build_server(config: &prism_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        SttServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize STT server: {e}"))?,
    );
    Ok(server)
}

/// Answer one transcription request
///
/// The bearer token is checked before the body is read, so unauthorized
/// callers never reach the backend.
pub async fn handle(server: Arc<Server>, request: Request) -> Response {
    match transcribe(&server, request).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "transcription request failed");
            err.into_response()
        }
    }
}

async fn transcribe(server: &Server, request: Request) -> Result<TranscriptionResponse> {
    let api_key = prism_core::bearer_token(request.headers()).map_err(|e| {
        tracing::debug!("Rejecting transcription request: {e}");
        SttError::Unauthorized
    })?;

    let ExtractMultipart(upload) = ExtractMultipart::from_request(request, &()).await?;

    tracing::debug!(
        model = %upload.model,
        filename = %upload.filename,
        audio_bytes = upload.audio.len(),
        format = %upload.response_format,
        "STT transcription handler called"
    );

    let response = server.transcribe(&api_key, &upload).await?;

    tracing::debug!("Transcription complete");

    Ok(response)
}
