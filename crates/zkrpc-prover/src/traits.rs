//! # Proof Backend Trait
//!
//! The contract consumed from the proving engine. The engine keeps its
//! configured inputs as process-wide state, so `configure_inputs` followed
//! by `produce_*` is only meaningful when no other caller interleaves.
//! Callers go through [`Prover`](crate::Prover), which enforces that.
//!
//! ## Ownership
//!
//! `Artifact` is deliberately not `Clone`. `release_artifact` takes it by
//! value, so an artifact can be released at most once, and only by whoever
//! owns it.

use zkrpc_core::CircuitInputs;

/// A proving engine: object-handle API plus a byte-oriented API.
pub trait ProofBackend: Send + Sync + 'static {
    /// Opaque proof object owned by the engine until released.
    ///
    /// Must be `Sync`: checking an artifact is read-only, and the handle
    /// store lets concurrent verifications of one artifact run in parallel.
    type Artifact: Send + Sync + 'static;

    /// Short backend name for log lines.
    fn name(&self) -> &'static str;

    /// Set the inputs used by the next `produce_*` call.
    fn configure_inputs(&self, inputs: &CircuitInputs);

    /// Produce a proof object from the configured inputs.
    ///
    /// `None` means the engine failed (the native API returns NULL).
    fn produce_artifact(&self) -> Option<Self::Artifact>;

    /// Verify a proof object. `false` means the proof was rejected.
    fn check_artifact(&self, artifact: &Self::Artifact) -> bool;

    /// Release a proof object back to the engine.
    fn release_artifact(&self, artifact: Self::Artifact);

    /// Produce a serialized proof from the configured inputs.
    ///
    /// Any intermediate object is released before returning.
    fn produce_bytes(&self) -> Option<Vec<u8>>;

    /// Verify a serialized proof. Malformed bytes verify as `false`.
    fn check_bytes(&self, proof: &[u8]) -> bool;
}
