//! Mock Gemini `generateContent` backend
//!
//! Answers every call with a canned text and records what it was sent.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

pub struct MockGemini {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockGeminiState>,
}

/// What the last call carried
#[derive(Debug, Clone, Default)]
pub struct SeenCall {
    pub action: String,
    pub api_key: Option<String>,
    pub prompt: String,
    pub mime_type: String,
    pub data: String,
}

struct MockGeminiState {
    call_count: AtomicU32,
    status: StatusCode,
    answer: String,
    last_call: Mutex<Option<SeenCall>>,
}

impl MockGemini {
    /// Start a mock answering with `answer` as the model text
    pub async fn start(answer: &str) -> anyhow::Result<Self> {
        Self::start_inner(StatusCode::OK, answer).await
    }

    /// Start a mock that fails every call with `status`
    pub async fn start_failing(status: StatusCode) -> anyhow::Result<Self> {
        Self::start_inner(status, "backend unavailable").await
    }

    async fn start_inner(status: StatusCode, answer: &str) -> anyhow::Result<Self> {
        let state = Arc::new(MockGeminiState {
            call_count: AtomicU32::new(0),
            status,
            answer: answer.to_owned(),
            last_call: Mutex::new(None),
        });

        let app = Router::new()
            .route("/v1beta/models/{action}", routing::post(handle_generate))
            .with_state(Arc::clone(&state));

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

    /// Base URL to configure as the transcription backend
    pub fn base_url(&self) -> String {
        format!("http://{}/v1beta", self.addr)
    }

    pub fn call_count(&self) -> u32 {
        self.state.call_count.load(Ordering::Relaxed)
    }

    pub fn last_call(&self) -> Option<SeenCall> {
        self.state.last_call.lock().unwrap().clone()
    }
}

impl Drop for MockGemini {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_generate(
    State(state): State<Arc<MockGeminiState>>,
    Path(action): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.call_count.fetch_add(1, Ordering::Relaxed);

    let parts = &body["contents"][0]["parts"];
    let seen = SeenCall {
        action,
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        prompt: parts[0]["text"].as_str().unwrap_or_default().to_owned(),
        mime_type: parts[1]["inlineData"]["mimeType"].as_str().unwrap_or_default().to_owned(),
        data: parts[1]["inlineData"]["data"].as_str().unwrap_or_default().to_owned(),
    };
    *state.last_call.lock().unwrap() = Some(seen);

    if !state.status.is_success() {
        return (state.status, state.answer.clone()).into_response();
    }

    Json(serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": state.answer }]
            },
            "finishReason": "STOP"
        }]
    }))
    .into_response()
}
