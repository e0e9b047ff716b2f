use std::path::Path;

use axum::{
    body::Body,
    extract::{FromRequest, Multipart},
};

use crate::error::SttError;
use crate::types::TranscriptionRequest;

/// Audio container assumed when the filename has no extension
const DEFAULT_AUDIO_KIND: &str = "mp3";

/// Output format used when the form does not name one
const DEFAULT_RESPONSE_FORMAT: &str = "json";

/// Extractor for the multipart transcription upload
///
/// The upload size is bounded by whatever `DefaultBodyLimit` the router
/// applies.
pub struct ExtractMultipart(pub TranscriptionRequest);

impl<S> FromRequest<S> for ExtractMultipart
where
    S: Send + Sync,
{
    type Rejection = SttError;

    async fn from_request(request: http::Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = request
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("multipart/form-data") {
            return Err(SttError::InvalidRequest(
                "Failed to parse multipart form: expected 'Content-Type: multipart/form-data'".to_owned(),
            ));
        }

        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| SttError::InvalidRequest(format!("Failed to parse multipart form: {e}")))?;

        let mut audio: Option<(String, Vec<u8>)> = None;
        let mut model: Option<String> = None;
        let mut prompt: Option<String> = None;
        let mut response_format: Option<String> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| SttError::InvalidRequest(format!("Failed to parse multipart form: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_owned();

            match name.as_str() {
                "file" => {
                    let filename = field.file_name().unwrap_or_default().to_owned();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| SttError::InvalidRequest(format!("Failed to read file: {e}")))?;
                    audio = Some((filename, bytes.to_vec()));
                }
                "model" => model = Some(text_field(field, "model").await?),
                "prompt" => prompt = Some(text_field(field, "prompt").await?),
                "response_format" => response_format = Some(text_field(field, "response_format").await?),
                _ => {}
            }
        }

        let (filename, audio) = audio.ok_or_else(|| SttError::InvalidRequest("No file uploaded".to_owned()))?;

        let model = model
            .filter(|model| !model.is_empty())
            .ok_or_else(|| SttError::InvalidRequest("Missing required 'model' field".to_owned()))?;

        let response_format = response_format
            .filter(|format| !format.is_empty())
            .unwrap_or_else(|| DEFAULT_RESPONSE_FORMAT.to_owned());

        Ok(Self(TranscriptionRequest {
            audio_kind: audio_kind(&filename),
            audio,
            filename,
            model,
            prompt,
            response_format,
        }))
    }
}

async fn text_field(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<String, SttError> {
    field
        .text()
        .await
        .map_err(|e| SttError::InvalidRequest(format!("Failed to read {name} field: {e}")))
}

/// Lowercased filename extension, or `mp3` when there is none
fn audio_kind(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map_or_else(|| DEFAULT_AUDIO_KIND.to_owned(), str::to_ascii_lowercase)
}
