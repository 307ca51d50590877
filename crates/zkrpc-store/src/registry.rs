//! # Registry Capability Trait
//!
//! The lifecycle contract every transport adapter depends on. Adapters hold
//! `Arc<dyn ProofRegistry>` and never see the backend type.

use zkrpc_core::{CircuitInputs, ProofId, StoreError};

/// Generate / verify / free / close over opaque proof objects.
pub trait ProofRegistry: Send + Sync {
    /// Prove `inputs`, store the result, and return a fresh identity.
    ///
    /// # Errors
    ///
    /// [`StoreError::GenerationFailed`] if the backend produced nothing; the
    /// registry is left unchanged.
    fn generate(&self, inputs: CircuitInputs) -> Result<ProofId, StoreError>;

    /// Verify the proof stored under `id`. `Ok(false)` means rejected.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownIdentity`] if `id` is not live.
    fn verify(&self, id: &ProofId) -> Result<bool, StoreError>;

    /// Remove `id` and release its proof object.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownIdentity`] if `id` is not live, including a
    /// second free of the same identity.
    fn free(&self, id: &ProofId) -> Result<(), StoreError>;

    /// Release every live proof object. Returns how many were released.
    fn close(&self) -> usize;

    /// Number of live identities.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
