use serde::Deserialize;
use url::Url;

/// Native Gemini API root
pub const DEFAULT_NATIVE_URL: &str = "https://generativelanguage.googleapis.com";
/// OpenAI-compatible surface of the Gemini API
pub const DEFAULT_COMPATIBLE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
/// Paths starting with this prefix belong to the compatible surface
pub const DEFAULT_COMPATIBLE_PREFIX: &str = "/v1/";
/// Compatible paths containing this marker are transcription requests
pub const DEFAULT_TRANSCRIPTION_MARKER: &str = "/audio/transcriptions";

/// The two upstream APIs and the path conventions used to pick between them
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    /// Base URL of the native API
    #[serde(default = "default_native_url")]
    pub native_url: Url,
    /// Base URL of the OpenAI-compatible API, including its sub-path
    #[serde(default = "default_compatible_url")]
    pub compatible_url: Url,
    /// Literal prefix classifying a request as compatible
    #[serde(default = "default_compatible_prefix")]
    pub compatible_prefix: String,
    /// Substring marking a compatible request as a transcription request
    #[serde(default = "default_transcription_marker")]
    pub transcription_marker: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            native_url: default_native_url(),
            compatible_url: default_compatible_url(),
            compatible_prefix: default_compatible_prefix(),
            transcription_marker: default_transcription_marker(),
        }
    }
}

fn default_native_url() -> Url {
    Url::parse(DEFAULT_NATIVE_URL).expect("valid default native URL")
}

fn default_compatible_url() -> Url {
    Url::parse(DEFAULT_COMPATIBLE_URL).expect("valid default compatible URL")
}

fn default_compatible_prefix() -> String {
    DEFAULT_COMPATIBLE_PREFIX.to_string()
}

fn default_transcription_marker() -> String {
    DEFAULT_TRANSCRIPTION_MARKER.to_string()
}
