use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use prism_core::HttpError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProxyError>;

/// Errors raised while relaying a request to an upstream
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Connecting to or exchanging data with the upstream failed
    #[error("upstream request failed: {0}")]
    UpstreamFailure(String),

    /// The outbound request could not be assembled
    #[error("invalid upstream request: {0}")]
    InvalidRequest(String),
}

impl HttpError for ProxyError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::UpstreamFailure(_) => StatusCode::BAD_GATEWAY,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({ "error": self.client_message() });

        (status, Json(body)).into_response()
    }
}
