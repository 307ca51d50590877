//! # Serialized Prover
//!
//! [`Prover`] is the single entry point to a [`ProofBackend`]. It owns the
//! critical section that spans input configuration and proof production:
//! the backend's inputs are shared state, so two callers interleaving
//! `configure_inputs` and `produce_*` would prove each other's inputs.
//!
//! One `Prover` is shared (behind `Arc`) by every adapter in a process.
//! The lock is independent of any registry lock and guards only the
//! configure + produce pair; verification and release do not take it.

use parking_lot::Mutex;
use zkrpc_core::{CircuitInputs, ProverError};

use crate::traits::ProofBackend;

/// A proving backend plus its input critical section.
#[derive(Debug)]
pub struct Prover<B: ProofBackend> {
    backend: B,
    input_lock: Mutex<()>,
}

impl<B: ProofBackend> Prover<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            input_lock: Mutex::new(()),
        }
    }

    /// Access the backend, e.g. for instrumentation in tests.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Configure `inputs` and run `produce` while holding the input lock.
    pub fn with_inputs<R>(&self, inputs: &CircuitInputs, produce: impl FnOnce(&B) -> R) -> R {
        let _guard = self.input_lock.lock();
        self.backend.configure_inputs(inputs);
        produce(&self.backend)
    }

    /// Produce a proof object for `inputs`.
    pub fn generate_artifact(&self, inputs: &CircuitInputs) -> Result<B::Artifact, ProverError> {
        let artifact = self.with_inputs(inputs, |backend| backend.produce_artifact());
        artifact.ok_or_else(|| {
            tracing::warn!(backend = self.backend.name(), "backend returned no proof object");
            ProverError::GenerationFailed
        })
    }

    /// Produce a serialized proof for `inputs`.
    pub fn generate_bytes(&self, inputs: &CircuitInputs) -> Result<Vec<u8>, ProverError> {
        let proof = self.with_inputs(inputs, |backend| backend.produce_bytes());
        proof.ok_or_else(|| {
            tracing::warn!(backend = self.backend.name(), "backend returned no proof bytes");
            ProverError::GenerationFailed
        })
    }

    pub fn check_artifact(&self, artifact: &B::Artifact) -> bool {
        self.backend.check_artifact(artifact)
    }

    pub fn release_artifact(&self, artifact: B::Artifact) {
        self.backend.release_artifact(artifact);
    }

    pub fn check_bytes(&self, proof: &[u8]) -> bool {
        self.backend.check_bytes(proof)
    }
}

impl<B: ProofBackend + Default> Default for Prover<B> {
    fn default() -> Self {
        Self::new(B::default())
    }
}
