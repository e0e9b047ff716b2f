//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use prism_config::{Config, ServerConfig, SttConfig, UpstreamConfig};
use url::Url;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Defaults with a loopback listen address; upstreams still point at Google
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    ..ServerConfig::default()
                },
                upstream: UpstreamConfig::default(),
                stt: SttConfig {
                    timeout_secs: 10,
                    ..SttConfig::default()
                },
                ..Config::default()
            },
        }
    }

    /// Point the native surface at a mock
    pub fn with_native_upstream(mut self, base_url: &str) -> Self {
        self.config.upstream.native_url = parse(base_url);
        self
    }

    /// Point the compatible surface at a mock
    pub fn with_compatible_upstream(mut self, base_url: &str) -> Self {
        self.config.upstream.compatible_url = parse(base_url);
        self
    }

    /// Point the transcription backend at a mock Gemini
    pub fn with_stt_backend(mut self, base_url: &str) -> Self {
        self.config.stt.base_url = parse(base_url);
        self
    }

    pub fn with_max_upload_bytes(mut self, limit: usize) -> Self {
        self.config.stt.max_upload_bytes = limit;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}

fn parse(url: &str) -> Url {
    url.parse().expect("valid URL")
}
