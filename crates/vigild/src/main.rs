//! vigild — the Vigil daemon.
//!
//! Single binary that assembles the Vigil subsystems:
//! - Service registry (built once from `vigil.toml`)
//! - Result cache + status collector
//! - Background refresh loop
//! - Dashboard + REST API
//!
//! # Usage
//!
//! ```text
//! vigild --config vigil.toml --port 8099
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::sync::watch;
use tracing::info;

use vigil_checkers::Registry;
use vigil_core::VigilConfig;
use vigil_engine::{Collector, ResultCache};

#[derive(Parser)]
#[command(name = "vigild", about = "Vigil status dashboard daemon")]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, default_value = "vigil.toml")]
    config: PathBuf,

    /// Host to bind to (overrides the settings block).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides the settings block).
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "info,vigild=debug,vigil_engine=debug,vigil_checkers=debug"
                        .parse()
                        .unwrap()
                }),
        )
        .init();

    let cli = Cli::parse();
    run(cli).await
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    info!("Vigil daemon starting");

    let config = VigilConfig::from_file(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    let settings = config.settings.clone();

    let host = cli.host.unwrap_or(settings.host);
    let port = cli.port.unwrap_or(settings.port);

    // ── Initialize subsystems ──────────────────────────────────

    let registry = Arc::new(Registry::build(&config.services));
    info!(
        services = registry.len(),
        configured = config.services.len(),
        "service registry built"
    );

    let cache = ResultCache::new(Duration::from_secs(settings.cache_ttl));
    let collector = Arc::new(Collector::new(registry, cache));

    // ── Shutdown signal ────────────────────────────────────────

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Background refresh loop ────────────────────────────────

    let refresh_collector = collector.clone();
    let refresh_interval = Duration::from_secs(settings.refresh_interval);
    let refresh_handle = tokio::spawn(async move {
        refresh_collector.run(refresh_interval, shutdown_rx).await;
    });

    // ── Serve the dashboard ────────────────────────────────────

    let router = vigil_api::build_router(collector, settings.refresh_interval);
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .context("invalid listen address")?;

    info!(%addr, "dashboard listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Graceful shutdown on Ctrl-C.
    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
        info!("shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    server.await?;

    let _ = refresh_handle.await;

    info!("Vigil daemon stopped");
    Ok(())
}
