//! # OpenAPI Specification Assembly
//!
//! Collects the utoipa-documented routes into one OpenAPI document served
//! at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "zkrpc HTTP API",
        version = "0.1.0",
        description = "Stateless generation and verification of R1CS proofs for a * b + const.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::proofs::generate_proof,
        crate::routes::proofs::verify_proof,
        crate::middleware::metrics::metrics_handler,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::proofs::GenerateRequest,
        crate::routes::proofs::GenerateResponse,
        crate::routes::proofs::VerifyRequest,
        crate::routes::proofs::VerifyResponse,
        crate::middleware::metrics::MetricsSnapshot,
    )),
    tags(
        (name = "proofs", description = "Stateless proof generation and verification"),
        (name = "operations", description = "Service counters"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
