#![allow(clippy::must_use_candidate)]

pub mod egress;
mod env;
pub mod health;
mod loader;
pub mod server;
pub mod stt;
pub mod telemetry;
pub mod upstream;

use serde::Deserialize;

pub use egress::*;
pub use health::*;
pub use server::*;
pub use stt::*;
pub use telemetry::*;
pub use upstream::*;

/// Top-level prism configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Listener configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Native and OpenAI-compatible upstreams
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Optional outbound proxy shared by every outbound call
    #[serde(default)]
    pub egress: Option<EgressConfig>,
    /// Transcription endpoint configuration
    #[serde(default)]
    pub stt: SttConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
