//! # zkrpc-jsonrpc: Binary Entry Point
//!
//! Serves the `ZK` JSON-RPC service over TCP. Binds to `ZK_JSONRPC_ADDR`
//! (default `0.0.0.0:8547`). Live proofs are released on Ctrl-C.

use std::sync::Arc;

use zkrpc_prover::{ProofBackend, Prover};
use zkrpc_rpc::{serve_with_shutdown, RpcConfig, ZkService};
use zkrpc_store::{HandleStore, ProofRegistry};

#[cfg(feature = "libiop")]
type Backend = zkrpc_prover::libiop::LibiopBackend;
#[cfg(not(feature = "libiop"))]
type Backend = zkrpc_prover::TransparentBackend;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = RpcConfig::from_env()?;

    // One prover shared by the registry and the stateless methods.
    let prover = Arc::new(Prover::new(Backend::default()));
    let store = Arc::new(HandleStore::new(Arc::clone(&prover)));
    let service = ZkService::new(store.clone(), prover.clone());
    tracing::info!(backend = prover.backend().name(), "prover ready");

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("ZK JSON-RPC listening on {}", config.addr);

    serve_with_shutdown(listener, service, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for shutdown signal: {e}");
        }
    })
    .await?;

    let released = store.close();
    tracing::info!(released, "shutdown complete");
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
