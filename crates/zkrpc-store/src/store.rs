//! # Handle Store
//!
//! The concrete [`ProofRegistry`]. Locks are `parking_lot` (non-poisoning)
//! and are never held across a backend call except where noted:
//!
//! - `generate` proves under the prover's input lock, then takes the
//!   registry lock only to allocate the identity and insert.
//! - `verify` clones the entry `Arc` under the registry lock and checks the
//!   proof under the entry's read lock.
//! - `free` removes the entry under the registry lock, then takes the entry's
//!   write lock (waiting out concurrent verifies) and releases.
//! - `close` drains and releases everything under the registry lock.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use zkrpc_core::{CircuitInputs, ProofId, StoreError};
use zkrpc_prover::{ProofBackend, Prover};

use crate::registry::ProofRegistry;

/// A live proof object. `None` once released.
type Slot<A> = Arc<RwLock<Option<A>>>;

#[derive(Debug)]
struct Registry<A> {
    /// Count of successful generations; the next identity is `next + 1`.
    next: u64,
    entries: HashMap<ProofId, Slot<A>>,
}

/// Registry of proof objects keyed by store-issued identities.
pub struct HandleStore<B: ProofBackend> {
    prover: Arc<Prover<B>>,
    registry: Mutex<Registry<B::Artifact>>,
}

impl<B: ProofBackend> HandleStore<B> {
    /// Create an empty store proving through `prover`.
    ///
    /// The prover may be shared with other adapters; its input lock is what
    /// serializes proof production process-wide.
    pub fn new(prover: Arc<Prover<B>>) -> Self {
        Self {
            prover,
            registry: Mutex::new(Registry {
                next: 0,
                entries: HashMap::new(),
            }),
        }
    }

    /// Create a store with a private prover around `backend`.
    pub fn with_backend(backend: B) -> Self {
        Self::new(Arc::new(Prover::new(backend)))
    }

    /// The prover this store generates through.
    pub fn prover(&self) -> &Arc<Prover<B>> {
        &self.prover
    }

    /// Whether `id` is currently live.
    pub fn contains(&self, id: &ProofId) -> bool {
        self.registry.lock().entries.contains_key(id)
    }

    fn lookup(&self, id: &ProofId) -> Result<Slot<B::Artifact>, StoreError> {
        self.registry
            .lock()
            .entries
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::UnknownIdentity(id.clone()))
    }
}

impl<B: ProofBackend> ProofRegistry for HandleStore<B> {
    fn generate(&self, inputs: CircuitInputs) -> Result<ProofId, StoreError> {
        let artifact = self.prover.generate_artifact(&inputs)?;

        let mut registry = self.registry.lock();
        registry.next += 1;
        let id = ProofId::from_sequence(registry.next);
        registry
            .entries
            .insert(id.clone(), Arc::new(RwLock::new(Some(artifact))));
        drop(registry);

        tracing::debug!(proof_id = %id, "proof registered");
        Ok(id)
    }

    fn verify(&self, id: &ProofId) -> Result<bool, StoreError> {
        let slot = self.lookup(id)?;
        let guard = slot.read();
        // A free that won the race leaves the slot empty.
        let artifact = guard
            .as_ref()
            .ok_or_else(|| StoreError::UnknownIdentity(id.clone()))?;
        let ok = self.prover.check_artifact(artifact);
        tracing::debug!(proof_id = %id, ok, "proof verified");
        Ok(ok)
    }

    fn free(&self, id: &ProofId) -> Result<(), StoreError> {
        let slot = self
            .registry
            .lock()
            .entries
            .remove(id)
            .ok_or_else(|| StoreError::UnknownIdentity(id.clone()))?;

        let artifact = slot
            .write()
            .take()
            .ok_or_else(|| StoreError::UnknownIdentity(id.clone()))?;
        self.prover.release_artifact(artifact);
        tracing::debug!(proof_id = %id, "proof released");
        Ok(())
    }

    fn close(&self) -> usize {
        let mut registry = self.registry.lock();
        let mut released = 0;
        for (_, slot) in registry.entries.drain() {
            if let Some(artifact) = slot.write().take() {
                self.prover.release_artifact(artifact);
                released += 1;
            }
        }
        if released > 0 {
            tracing::info!(released, "handle store closed");
        }
        released
    }

    fn len(&self) -> usize {
        self.registry.lock().entries.len()
    }
}

impl<B: ProofBackend> Drop for HandleStore<B> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<B: ProofBackend> std::fmt::Debug for HandleStore<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandleStore")
            .field("backend", &self.prover.backend().name())
            .field("live", &self.len())
            .finish()
    }
}
