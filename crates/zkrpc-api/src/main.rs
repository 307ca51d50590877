//! # zkrpc-http: Binary Entry Point
//!
//! Starts the Axum HTTP server. Binds to `ZK_RPC_PORT` (default 8080).

use std::sync::Arc;

use zkrpc_api::state::{AppConfig, AppState};
use zkrpc_prover::{ProofBackend, Prover};

#[cfg(feature = "libiop")]
type Backend = zkrpc_prover::libiop::LibiopBackend;
#[cfg(not(feature = "libiop"))]
type Backend = zkrpc_prover::TransparentBackend;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = AppConfig::from_env()?;
    let port = config.port;

    let prover = Arc::new(Prover::new(Backend::default()));
    tracing::info!(backend = prover.backend().name(), "prover ready");
    let app = zkrpc_api::app(AppState::with_prover(prover, config));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("zkrpc HTTP API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to listen for shutdown signal: {e}");
            }
        })
        .await?;

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
