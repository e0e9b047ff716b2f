use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use url::Url;

/// Prism gateway
#[derive(Debug, Parser)]
#[command(
    name = "prism",
    about = "Gateway for the Gemini native and OpenAI-compatible APIs with audio transcription"
)]
pub struct Args {
    /// Path to configuration file; built-in defaults are used when omitted
    #[arg(short, long, env = "PRISM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "PRISM_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Egress proxy for all outbound traffic (http, https, socks5, socks5h)
    #[arg(long, env = "PRISM_PROXY")]
    pub proxy: Option<Url>,

    /// Log filter directive, e.g. `info` or `prism_proxy=debug`
    #[arg(long, env = "PRISM_LOG")]
    pub log_filter: Option<String>,
}
