//! # zkrpc-api: HTTP JSON Adapter
//!
//! Stateless proof generation and verification over HTTP. No handle
//! registry is involved: every request stands alone and proofs are carried
//! as base64 text.
//!
//! ## API Surface
//!
//! | Route                    | Module                       | Purpose                 |
//! |--------------------------|------------------------------|-------------------------|
//! | `POST /generate`         | [`routes::proofs`]           | Prove `{a, b, const}`   |
//! | `POST /verify`           | [`routes::proofs`]           | Verify `{proof_base64}` |
//! | `GET /metrics`           | [`middleware::metrics`]      | Counter snapshot        |
//! | `GET /openapi.json`      | [`openapi`]                  | OpenAPI document        |
//! | `GET /health/liveness`   | here                         | Liveness probe          |
//! | `GET /health/readiness`  | here                         | Readiness probe         |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Assemble the application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    app_with_metrics(state, ApiMetrics::new())
}

/// Like [`app`], recording into caller-supplied counters.
pub fn app_with_metrics(state: AppState, metrics: ApiMetrics) -> Router {
    let api = Router::new()
        .merge(routes::proofs::router())
        .merge(openapi::router())
        .route("/metrics", get(middleware::metrics::metrics_handler))
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(axum::Extension(metrics))
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new().merge(health).merge(api)
}

async fn liveness() -> &'static str {
    "ok"
}

async fn readiness() -> &'static str {
    "ready"
}
