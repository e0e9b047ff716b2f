pub(crate) mod gemini;

use async_trait::async_trait;
use secrecy::SecretString;

/// Inputs for a single generation call
#[derive(Debug, Clone, Copy)]
pub struct GenerateRequest<'a> {
    /// Caller's credential, forwarded to the backend
    pub api_key: &'a SecretString,
    /// Backend model identifier
    pub model: &'a str,
    /// Full instruction text
    pub prompt: &'a str,
    /// Complete audio payload
    pub audio: &'a [u8],
    /// MIME type of `audio`
    pub mime_type: &'a str,
}

/// A generative backend able to listen to audio and answer in text
#[async_trait]
pub trait TranscriptionBackend: Send + Sync {
    /// Send prompt and audio, return the backend's raw text answer
    async fn generate(&self, request: GenerateRequest<'_>) -> crate::error::Result<String>;
}
