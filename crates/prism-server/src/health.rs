use http::StatusCode;

/// Liveness probe; answered locally, never by an upstream
pub async fn health_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
