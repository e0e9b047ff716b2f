use std::net::SocketAddr;

use serde::Deserialize;

use crate::health::HealthConfig;

/// Default listen port, matching the gateway's historical `:8085`
pub const DEFAULT_LISTEN_PORT: u16 = 8085;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    #[serde(default)]
    pub health: HealthConfig,
}

impl ServerConfig {
    /// Configured listen address, or `0.0.0.0:8085`
    pub fn listen_address(&self) -> SocketAddr {
        self.listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], DEFAULT_LISTEN_PORT)))
    }
}
