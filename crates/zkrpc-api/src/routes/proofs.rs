//! # Stateless Proof Endpoints
//!
//! `POST /generate` and `POST /verify`. No proof identity is issued; each
//! request is independent and proofs travel as standard-alphabet base64.
//! Proof bytes are never logged.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Extension, Json, Router};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zkrpc_core::CircuitInputs;
use zkrpc_prover::StatelessProver;

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Circuit inputs for a new proof.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateRequest {
    pub a: u64,
    pub b: u64,
    #[serde(rename = "const")]
    pub const_val: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateResponse {
    /// Serialized proof, base64 (standard alphabet).
    pub proof_base64: String,
    /// Wall-clock proving time in milliseconds.
    pub prover_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifyRequest {
    pub proof_base64: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifyResponse {
    pub valid: bool,
    pub verifier_ms: f64,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate_proof))
        .route("/verify", post(verify_proof))
}

/// POST /generate: Prove `a * b + const` and return the serialized proof.
#[utoipa::path(
    post,
    path = "/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Proof generated", body = GenerateResponse),
        (status = 400, description = "Malformed request body", body = crate::error::ErrorBody),
        (status = 500, description = "Proof generation failed", body = crate::error::ErrorBody),
    ),
    tag = "proofs"
)]
pub async fn generate_proof(
    State(state): State<AppState>,
    Extension(metrics): Extension<ApiMetrics>,
    JsonBody(req): JsonBody<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let inputs = CircuitInputs::new(req.a, req.b, req.const_val);
    let generated = run_blocking(&state.prover, move |p| p.generate_stateless(&inputs)).await??;
    metrics.record_generation();
    tracing::info!(
        proof_len = generated.proof.len(),
        prover_ms = generated.prover_ms,
        "proof generated"
    );

    Ok(Json(GenerateResponse {
        proof_base64: STANDARD.encode(&generated.proof),
        prover_ms: generated.prover_ms,
    }))
}

/// POST /verify: Verify a serialized proof. Rejection is `valid: false`.
#[utoipa::path(
    post,
    path = "/verify",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Verification outcome", body = VerifyResponse),
        (status = 400, description = "Malformed body or invalid base64", body = crate::error::ErrorBody),
    ),
    tag = "proofs"
)]
pub async fn verify_proof(
    State(state): State<AppState>,
    Extension(metrics): Extension<ApiMetrics>,
    JsonBody(req): JsonBody<VerifyRequest>,
) -> Result<Json<VerifyResponse>, AppError> {
    let proof = STANDARD
        .decode(req.proof_base64.as_bytes())
        .map_err(|e| AppError::BadRequest(format!("invalid base64 proof: {e}")))?;
    let verification = run_blocking(&state.prover, move |p| p.verify_stateless(&proof)).await?;
    metrics.record_verification(verification.valid);
    tracing::info!(
        valid = verification.valid,
        verifier_ms = verification.verifier_ms,
        "proof verified"
    );

    Ok(Json(VerifyResponse {
        valid: verification.valid,
        verifier_ms: verification.verifier_ms,
    }))
}

/// Run a prover call on the blocking pool.
async fn run_blocking<R, F>(prover: &Arc<dyn StatelessProver>, f: F) -> Result<R, AppError>
where
    R: Send + 'static,
    F: FnOnce(&dyn StatelessProver) -> R + Send + 'static,
{
    let prover = Arc::clone(prover);
    tokio::task::spawn_blocking(move || f(prover.as_ref()))
        .await
        .map_err(|e| AppError::Internal(format!("prover task failed: {e}")))
}
