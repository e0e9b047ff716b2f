use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{GenerateRequest, TranscriptionBackend};
use crate::error::SttError;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini `generateContent` backend
pub(crate) struct GeminiBackend {
    client: Client,
    base_url: Url,
}

impl GeminiBackend {
    pub const fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Build the `generateContent` endpoint URL for a model
    ///
    /// Accepts both `gemini-2.5-flash` and `models/gemini-2.5-flash`.
    fn generate_url(&self, model: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{base}/models/{model}:generateContent")
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: [Part<'a>; 2],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum Part<'a> {
    Text(&'a str),
    InlineData(InlineData<'a>),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, concatenated; thoughts are skipped
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter(|part| !part.thought)
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl TranscriptionBackend for GeminiBackend {
    async fn generate(&self, request: GenerateRequest<'_>) -> crate::error::Result<String> {
        let url = self.generate_url(request.model);

        tracing::debug!(
            model = request.model,
            mime_type = request.mime_type,
            audio_bytes = request.audio.len(),
            "Gemini transcription request"
        );

        let body = GenerateContentRequest {
            contents: [Content {
                role: "user",
                parts: [
                    Part::Text(request.prompt),
                    Part::InlineData(InlineData {
                        mime_type: request.mime_type,
                        data: STANDARD.encode(request.audio),
                    }),
                ],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, request.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {e}");
                SttError::Backend(format!("failed to send request to Gemini: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!("Gemini API error ({status}): {error_text}");

            return Err(SttError::Backend(format!("provider returned {status}: {error_text}")));
        }

        let result: GenerateContentResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {e}");
            SttError::Backend(format!("failed to parse Gemini response: {e}"))
        })?;

        tracing::debug!("Gemini transcription complete");

        Ok(result.text())
    }
}
