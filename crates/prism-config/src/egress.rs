use serde::Deserialize;
use url::Url;

/// Outbound proxy applied to both the transparent forward and the
/// transcription backend call
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EgressConfig {
    /// Proxy URL, e.g. `http://127.0.0.1:1080` or `socks5://127.0.0.1:1080`
    pub proxy_url: Url,
}

/// Proxy schemes reqwest can dial
pub const SUPPORTED_PROXY_SCHEMES: [&str; 4] = ["http", "https", "socks5", "socks5h"];
