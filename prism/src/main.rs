#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use args::Args;
use clap::Parser;
use prism_config::{Config, EgressConfig};
use prism_server::Server;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    // Command line wins over the file
    if let Some(listen) = args.listen {
        config.server.listen_address = Some(listen);
    }
    if let Some(proxy_url) = args.proxy {
        config.egress = Some(EgressConfig { proxy_url });
        config.validate()?;
    }

    // Initialize telemetry
    prism_telemetry::init(&config.telemetry, args.log_filter.as_deref())?;

    let config_path = args
        .config
        .as_ref()
        .map_or_else(|| "<defaults>".to_owned(), |path| path.display().to_string());

    tracing::info!(
        %config_path,
        native_url = %config.upstream.native_url,
        compatible_url = %config.upstream.compatible_url,
        egress_proxy = config.egress.is_some(),
        "starting prism"
    );

    // Build server
    let server = Server::new(&config)?;

    // Set up graceful shutdown
    let shutdown = CancellationToken::new();
    let shutdown_clone = shutdown.clone();

    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_clone.cancel();
    });

    // Run server
    server.serve(shutdown).await?;

    tracing::info!("prism stopped");
    Ok(())
}

/// Wait for a shutdown signal (`SIGINT` or `SIGTERM`)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
