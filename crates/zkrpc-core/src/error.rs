//! # Error Types
//!
//! Error hierarchy shared by the prover, the handle store, and the
//! transport adapters. All errors use `thiserror`.
//!
//! ## Design
//!
//! - A proof that verifies to `false` is never an error; it is a normal
//!   result carrying `false`.
//! - Every variant maps to one machine-readable code via [`ZkError::code`],
//!   which both the JSON-RPC and HTTP adapters put on the wire.

use thiserror::Error;

use crate::identity::ProofId;

/// Failure reported by the proving backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProverError {
    /// The backend returned no proof (null handle or failed status).
    #[error("proof generation failed")]
    GenerationFailed,
}

/// Failure of a handle store operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not produce a proof. The registry is unchanged.
    #[error("proof generation failed")]
    GenerationFailed,

    /// The identity was never issued, was already freed, or belongs to
    /// another store.
    #[error("unknown proof id: {0}")]
    UnknownIdentity(ProofId),
}

impl From<ProverError> for StoreError {
    fn from(err: ProverError) -> Self {
        match err {
            ProverError::GenerationFailed => Self::GenerationFailed,
        }
    }
}

/// Top-level error seen at the transport boundary.
#[derive(Error, Debug)]
pub enum ZkError {
    /// Handle store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Stateless prover failure.
    #[error(transparent)]
    Prover(#[from] ProverError),

    /// The request could not be decoded (bad JSON, bad base64, unknown method).
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// Connection or listener fault.
    #[error("transport failure: {0}")]
    Transport(#[from] std::io::Error),
}

impl ZkError {
    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Store(StoreError::GenerationFailed) | Self::Prover(ProverError::GenerationFailed) => {
                "GENERATION_FAILED"
            }
            Self::Store(StoreError::UnknownIdentity(_)) => "UNKNOWN_IDENTITY",
            Self::MalformedRequest(_) => "MALFORMED_REQUEST",
            Self::Transport(_) => "TRANSPORT_FAILURE",
        }
    }
}
