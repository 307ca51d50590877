//! # ZK Service Dispatch
//!
//! Routes a decoded request to the registry or the stateless prover.
//! Backend calls block, so each request runs on the blocking pool; the
//! connection task awaits it before reading the next line.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;
use serde_json::Value;
use zkrpc_core::{ProofId, ZkError};
use zkrpc_prover::StatelessProver;
use zkrpc_store::ProofRegistry;

use crate::protocol::{
    decode_params, FreeArgs, FreeReply, GenerateArgs, GenerateReply, JobRequest, Method,
    ProofResponse, RpcRequest, RpcResponse, VerifyArgs, VerifyJobRequest, VerifyJobResponse,
    VerifyReply,
};

/// The `ZK` service: registry methods plus stateless proving.
#[derive(Clone)]
pub struct ZkService {
    registry: Arc<dyn ProofRegistry>,
    prover: Arc<dyn StatelessProver>,
}

impl ZkService {
    pub fn new(registry: Arc<dyn ProofRegistry>, prover: Arc<dyn StatelessProver>) -> Self {
        Self { registry, prover }
    }

    pub fn registry(&self) -> &Arc<dyn ProofRegistry> {
        &self.registry
    }

    /// Answer one request. Never fails; errors become error responses.
    pub async fn handle(&self, request: RpcRequest) -> RpcResponse {
        let RpcRequest { method, params, id } = request;
        let method = match method.parse::<Method>() {
            Ok(method) => method,
            Err(err) => return RpcResponse::failure(id, &err),
        };

        let service = self.clone();
        let outcome = tokio::task::spawn_blocking(move || service.call(method, params)).await;
        match outcome {
            Ok(Ok(result)) => RpcResponse::success(id, result),
            Ok(Err(err)) => {
                tracing::debug!(?method, code = err.code(), error = %err, "request failed");
                RpcResponse::failure(id, &err)
            }
            Err(join) => {
                tracing::error!(?method, error = %join, "request handler panicked");
                let err = ZkError::Transport(std::io::Error::other("request handler aborted"));
                RpcResponse::failure(id, &err)
            }
        }
    }

    /// Run `method` synchronously.
    pub fn call(&self, method: Method, params: Value) -> Result<Value, ZkError> {
        match method {
            Method::Generate => self.generate(decode_params(params)?),
            Method::Verify => self.verify(decode_params(params)?),
            Method::Free => self.free(decode_params(params)?),
            Method::SubmitJob => self.submit_job(decode_params(params)?),
            Method::VerifyJob => self.verify_job(decode_params(params)?),
        }
    }

    fn generate(&self, args: GenerateArgs) -> Result<Value, ZkError> {
        let id = self.registry.generate(args.into())?;
        tracing::info!(proof_id = %id, "proof generated");
        reply(GenerateReply {
            proof_id: id.to_string(),
        })
    }

    fn verify(&self, args: VerifyArgs) -> Result<Value, ZkError> {
        let ok = self.registry.verify(&ProofId::from(args.proof_id))?;
        reply(VerifyReply { ok })
    }

    fn free(&self, args: FreeArgs) -> Result<Value, ZkError> {
        let id = ProofId::from(args.proof_id);
        self.registry.free(&id)?;
        tracing::info!(proof_id = %id, "proof freed");
        reply(FreeReply {})
    }

    fn submit_job(&self, job: JobRequest) -> Result<Value, ZkError> {
        let response = match self.prover.generate_stateless(&job.into()) {
            Ok(generated) => ProofResponse {
                proof: Some(STANDARD.encode(&generated.proof)),
                prover_ms: generated.prover_ms,
                error: None,
            },
            Err(err) => ProofResponse {
                proof: None,
                prover_ms: 0.0,
                error: Some(err.to_string()),
            },
        };
        reply(response)
    }

    fn verify_job(&self, request: VerifyJobRequest) -> Result<Value, ZkError> {
        let proof = STANDARD
            .decode(request.proof.as_bytes())
            .map_err(|e| ZkError::MalformedRequest(format!("invalid base64 proof: {e}")))?;
        let verification = self.prover.verify_stateless(&proof);
        reply(VerifyJobResponse {
            verified: verification.valid,
            verifier_ms: verification.verifier_ms,
        })
    }
}

fn reply<T: Serialize>(value: T) -> Result<Value, ZkError> {
    serde_json::to_value(value).map_err(|e| ZkError::Transport(e.into()))
}
