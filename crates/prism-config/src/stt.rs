use serde::Deserialize;
use url::Url;

/// Default Gemini REST root used for transcription
pub const DEFAULT_STT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Transcription endpoint configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SttConfig {
    /// Base URL of the `generateContent` backend
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Upper bound for an uploaded multipart body
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Timeout for a single backend call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            max_upload_bytes: default_max_upload_bytes(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_STT_BASE_URL).expect("valid default STT URL")
}

const fn default_max_upload_bytes() -> usize {
    100 << 20
}

const fn default_timeout_secs() -> u64 {
    300
}
