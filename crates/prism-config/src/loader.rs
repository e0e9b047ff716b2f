use std::path::Path;

use crate::{Config, SUPPORTED_PROXY_SCHEMES};
use url::Url;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        tracing::debug!(
            native = %config.upstream.native_url,
            compatible = %config.upstream.compatible_url,
            "configuration loaded"
        );

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if an upstream URL is unusable, the routing
    /// conventions are malformed, or the egress proxy scheme is unsupported
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_upstreams()?;
        self.validate_stt()?;
        self.validate_egress()?;
        Ok(())
    }

    fn validate_upstreams(&self) -> anyhow::Result<()> {
        let upstream = &self.upstream;

        validate_http_url("upstream.native_url", &upstream.native_url)?;
        validate_http_url("upstream.compatible_url", &upstream.compatible_url)?;

        let prefix = &upstream.compatible_prefix;
        if prefix.len() < 2 || !prefix.starts_with('/') || !prefix.ends_with('/') {
            anyhow::bail!("upstream.compatible_prefix must start and end with '/', got `{prefix}`");
        }

        if upstream.transcription_marker.is_empty() {
            anyhow::bail!("upstream.transcription_marker must not be empty");
        }

        Ok(())
    }

    fn validate_stt(&self) -> anyhow::Result<()> {
        validate_http_url("stt.base_url", &self.stt.base_url)?;

        if self.stt.max_upload_bytes == 0 {
            anyhow::bail!("stt.max_upload_bytes must be greater than 0");
        }

        if self.stt.timeout_secs == 0 {
            anyhow::bail!("stt.timeout_secs must be greater than 0");
        }

        Ok(())
    }

    fn validate_egress(&self) -> anyhow::Result<()> {
        let Some(ref egress) = self.egress else {
            return Ok(());
        };

        let scheme = egress.proxy_url.scheme();
        if !SUPPORTED_PROXY_SCHEMES.contains(&scheme) {
            anyhow::bail!(
                "egress.proxy_url scheme `{scheme}` is not supported (expected one of {})",
                SUPPORTED_PROXY_SCHEMES.join(", ")
            );
        }

        Ok(())
    }
}

fn validate_http_url(field: &str, url: &Url) -> anyhow::Result<()> {
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("{field} must use http or https, got `{url}`");
    }

    if url.host_str().is_none_or(str::is_empty) {
        anyhow::bail!("{field} must include a host, got `{url}`");
    }

    Ok(())
}
