//! # Stateless Proving (Direct Invocation)
//!
//! Generate-and-serialize and verify-from-bytes without a registry. No
//! proof identity is issued and nothing is retained between calls.
//!
//! Timings are wall-clock milliseconds around the backend call only;
//! input configuration is excluded.

use std::time::Instant;

use zkrpc_core::{CircuitInputs, ProverError};

use crate::prover::Prover;
use crate::traits::ProofBackend;

/// A serialized proof and the time the backend spent producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct StatelessProof {
    pub proof: Vec<u8>,
    pub prover_ms: f64,
}

/// Outcome of verifying a serialized proof.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatelessVerification {
    pub valid: bool,
    pub verifier_ms: f64,
}

/// Object-safe stateless proving interface used by the transport adapters.
pub trait StatelessProver: Send + Sync {
    /// Prove `inputs` and return the serialized proof.
    fn generate_stateless(&self, inputs: &CircuitInputs) -> Result<StatelessProof, ProverError>;

    /// Verify a serialized proof. Rejection is `valid: false`, not an error.
    fn verify_stateless(&self, proof: &[u8]) -> StatelessVerification;
}

fn timed<R>(f: impl FnOnce() -> R) -> (R, f64) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed().as_secs_f64() * 1000.0)
}

impl<B: ProofBackend> StatelessProver for Prover<B> {
    fn generate_stateless(&self, inputs: &CircuitInputs) -> Result<StatelessProof, ProverError> {
        let (proof, prover_ms) = self.with_inputs(inputs, |backend| timed(|| backend.produce_bytes()));
        let proof = proof.ok_or_else(|| {
            tracing::warn!(backend = self.backend().name(), "stateless generation failed");
            ProverError::GenerationFailed
        })?;
        tracing::debug!(bytes = proof.len(), prover_ms, "stateless proof generated");
        Ok(StatelessProof { proof, prover_ms })
    }

    fn verify_stateless(&self, proof: &[u8]) -> StatelessVerification {
        let (valid, verifier_ms) = timed(|| self.check_bytes(proof));
        tracing::debug!(valid, verifier_ms, "stateless proof checked");
        StatelessVerification { valid, verifier_ms }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transparent::TransparentBackend;

    fn prover() -> Prover<TransparentBackend> {
        Prover::new(TransparentBackend::new())
    }

    #[test]
    fn generate_then_verify_round_trip() {
        let prover = prover();
        let generated = prover
            .generate_stateless(&CircuitInputs::new(232312, 13131, 1424124))
            .unwrap();
        assert!(!generated.proof.is_empty());
        assert!(generated.prover_ms >= 0.0);

        let verification = prover.verify_stateless(&generated.proof);
        assert!(verification.valid);
        assert!(verification.verifier_ms >= 0.0);
    }

    #[test]
    fn nothing_is_retained_between_calls() {
        let prover = prover();
        for i in 0..5 {
            prover.generate_stateless(&CircuitInputs::new(i, i, i)).unwrap();
        }
        assert_eq!(prover.backend().produced(), 0);
        assert_eq!(prover.backend().live_artifacts(), 0);
    }

    #[test]
    fn garbage_is_a_rejection_not_an_error() {
        let verification = prover().verify_stateless(b"not a proof");
        assert!(!verification.valid);
    }

    #[test]
    fn failure_surfaces_as_error() {
        let prover = prover();
        prover.backend().set_fail_generation(true);
        assert_eq!(
            prover.generate_stateless(&CircuitInputs::new(1, 2, 3)),
            Err(ProverError::GenerationFailed)
        );
    }

    #[test]
    fn usable_as_trait_object() {
        let prover: std::sync::Arc<dyn StatelessProver> = std::sync::Arc::new(prover());
        let generated = prover.generate_stateless(&CircuitInputs::new(4, 5, 6)).unwrap();
        assert!(prover.verify_stateless(&generated.proof).valid);
    }
}
