use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use prism_core::HttpError;
use thiserror::Error;

use crate::timecode::TimecodeError;
use crate::types::TranscriptionResponse;

pub type Result<T> = std::result::Result<T, SttError>;

/// Transcription endpoint errors with their HTTP status codes
#[derive(Debug, Error)]
pub enum SttError {
    /// Missing or unusable bearer token
    #[error("Unauthorized")]
    Unauthorized,

    /// Bad or incomplete multipart upload
    #[error("{0}")]
    InvalidRequest(String),

    /// A timecode in the backend answer could not be converted
    #[error(transparent)]
    InvalidTimecode(#[from] TimecodeError),

    /// Requested `response_format` is not one of the supported names
    ///
    /// Carries the response built before the format was rejected.
    #[error("unsupported format: {format}")]
    UnsupportedFormat {
        format: String,
        partial: Box<TranscriptionResponse>,
    },

    /// Backend answer was empty once code fences were removed
    #[error("transcription backend returned an empty answer")]
    EmptyAnswer,

    /// Backend answer is not the expected JSON envelope
    #[error("malformed transcription answer: {0}")]
    MalformedAnswer(String),

    /// The transcription backend call itself failed
    #[error("transcription backend error: {0}")]
    Backend(String),

    /// The endpoint could not be initialised
    #[error("configuration error: {0}")]
    Config(String),
}

impl HttpError for SttError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::InvalidTimecode(_)
            | Self::UnsupportedFormat { .. }
            | Self::EmptyAnswer
            | Self::MalformedAnswer(_)
            | Self::Backend(_)
            | Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

impl IntoResponse for SttError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({ "error": self.client_message() });

        (status, Json(body)).into_response()
    }
}
