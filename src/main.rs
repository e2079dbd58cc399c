//! sigdetect entrypoint: HTTP server, or a one-shot run with `--event <file>`.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use sigdetect::config::Config;
use sigdetect::detection::{Batch, BatchOrchestrator};
use sigdetect::gateway::{HandlerState, create_router_with_state};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check().await);
    }

    let config = Config::from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    config.validate()?;

    let orchestrator = Arc::new(BatchOrchestrator::from_config(&config));

    if let Some(event) = event_arg() {
        return run_event(&orchestrator, &event).await;
    }

    let addr: SocketAddr = config.socket_addr().parse()?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        storage = ?config.storage_provider,
        notifier = ?config.notifier,
        stub_model = config.stub_model,
        "sigdetect starting"
    );

    let app = create_router_with_state(HandlerState::new(orchestrator));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("sigdetect shutdown complete");
    Ok(())
}

fn event_arg() -> Option<PathBuf> {
    let mut args = std::env::args().skip_while(|arg| arg != "--event");
    args.next()?;
    args.next().map(PathBuf::from)
}

/// Runs the batch in `path` once and prints the report as JSON.
async fn run_event(orchestrator: &BatchOrchestrator, path: &Path) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading event file {}", path.display()))?;
    let batch: Batch = serde_json::from_str(&raw)
        .with_context(|| format!("parsing event file {}", path.display()))?;

    match orchestrator.run(&batch).await {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!(category = e.category(), error = %e, "Detection failed");
            Err(e.into())
        }
    }
}

async fn run_health_check() -> i32 {
    let port = std::env::var("SIGDETECT_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
    {
        Ok(client) => client,
        Err(_) => return 1,
    };

    match client.get(&url).send().await {
        Ok(res) if res.status().is_success() => 0,
        _ => 1,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
