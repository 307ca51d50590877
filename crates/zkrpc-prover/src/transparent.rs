//! # Transparent Proof Backend
//!
//! A deterministic, in-process stand-in for the native prover. The
//! "proof" is a SHA-256 commitment to the statement `out = a * b + const`;
//! it can be checked by anyone and hides nothing.
//!
//! ## Security Notice
//!
//! This backend provides NO zero-knowledge privacy and NO soundness against
//! a party that can compute SHA-256. Use the `libiop` backend for real proofs.
//!
//! ## Wire Format
//!
//! ```text
//! "ZKT1" | a (u64 LE) | b (u64 LE) | const (u64 LE) | out (u128 LE) | sha256 (32)
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use zkrpc_core::CircuitInputs;

use crate::traits::ProofBackend;

/// Leading bytes of every transparent proof.
pub const PROOF_MAGIC: &[u8; 4] = b"ZKT1";

/// Length of a serialized transparent proof.
pub const PROOF_LEN: usize = 4 + 8 * 3 + 16 + 32;

/// Domain separator mixed into every commitment.
const DOMAIN: &[u8] = b"zkrpc/transparent/r1cs/v1";

/// The proven statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statement {
    pub inputs: CircuitInputs,
    pub out: u128,
}

impl Statement {
    /// Evaluate the circuit. `u64 * u64 + u64` always fits in `u128`.
    pub fn evaluate(inputs: CircuitInputs) -> Self {
        let out = u128::from(inputs.a) * u128::from(inputs.b) + u128::from(inputs.const_val);
        Self { inputs, out }
    }

    fn commitment(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(DOMAIN);
        hasher.update(self.inputs.a.to_le_bytes());
        hasher.update(self.inputs.b.to_le_bytes());
        hasher.update(self.inputs.const_val.to_le_bytes());
        hasher.update(self.out.to_le_bytes());
        hasher.finalize().into()
    }
}

/// A transparent proof object.
#[derive(Debug)]
pub struct TransparentArtifact {
    statement: Statement,
    commitment: [u8; 32],
}

impl TransparentArtifact {
    /// The statement this artifact commits to.
    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(PROOF_LEN);
        bytes.extend_from_slice(PROOF_MAGIC);
        bytes.extend_from_slice(&self.statement.inputs.a.to_le_bytes());
        bytes.extend_from_slice(&self.statement.inputs.b.to_le_bytes());
        bytes.extend_from_slice(&self.statement.inputs.const_val.to_le_bytes());
        bytes.extend_from_slice(&self.statement.out.to_le_bytes());
        bytes.extend_from_slice(&self.commitment);
        bytes
    }

    fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != PROOF_LEN || &bytes[..4] != PROOF_MAGIC {
            return None;
        }
        let u64_at = |at: usize| -> Option<u64> {
            Some(u64::from_le_bytes(bytes.get(at..at + 8)?.try_into().ok()?))
        };
        let inputs = CircuitInputs::new(u64_at(4)?, u64_at(12)?, u64_at(20)?);
        let out = u128::from_le_bytes(bytes.get(28..44)?.try_into().ok()?);
        let commitment: [u8; 32] = bytes.get(44..76)?.try_into().ok()?;
        Some(Self {
            statement: Statement { inputs, out },
            commitment,
        })
    }

    fn is_valid(&self) -> bool {
        Statement::evaluate(self.statement.inputs) == self.statement
            && self.statement.commitment() == self.commitment
    }
}

/// In-process SHA-256 commitment backend.
///
/// Mirrors the native engine's shape: inputs are stored as shared state by
/// `configure_inputs` and read by the next `produce_*` call. Counters track
/// every artifact produced and released.
#[derive(Debug, Default)]
pub struct TransparentBackend {
    configured: Mutex<Option<CircuitInputs>>,
    produced: AtomicU64,
    released: AtomicU64,
    fail_generation: AtomicBool,
    prove_delay: Option<Duration>,
}

impl TransparentBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep for `delay` between reading the configured inputs and building
    /// the proof. Widens the window in which unserialized callers would race.
    pub fn with_prove_delay(mut self, delay: Duration) -> Self {
        self.prove_delay = Some(delay);
        self
    }

    /// Make every subsequent generation fail until reset.
    pub fn set_fail_generation(&self, fail: bool) {
        self.fail_generation.store(fail, Ordering::SeqCst);
    }

    /// Number of artifacts produced through the object API.
    pub fn produced(&self) -> u64 {
        self.produced.load(Ordering::SeqCst)
    }

    /// Number of artifacts released.
    pub fn released(&self) -> u64 {
        self.released.load(Ordering::SeqCst)
    }

    /// Artifacts produced but not yet released.
    pub fn live_artifacts(&self) -> u64 {
        self.produced().saturating_sub(self.released())
    }

    fn prove(&self) -> Option<TransparentArtifact> {
        if self.fail_generation.load(Ordering::SeqCst) {
            tracing::warn!(backend = self.name(), "generation failure injected");
            return None;
        }
        if let Some(delay) = self.prove_delay {
            std::thread::sleep(delay);
        }
        let inputs = (*self.configured.lock())?;
        let statement = Statement::evaluate(inputs);
        Some(TransparentArtifact {
            statement,
            commitment: statement.commitment(),
        })
    }
}

impl ProofBackend for TransparentBackend {
    type Artifact = TransparentArtifact;

    fn name(&self) -> &'static str {
        "transparent"
    }

    fn configure_inputs(&self, inputs: &CircuitInputs) {
        *self.configured.lock() = Some(*inputs);
    }

    fn produce_artifact(&self) -> Option<Self::Artifact> {
        let artifact = self.prove()?;
        self.produced.fetch_add(1, Ordering::SeqCst);
        Some(artifact)
    }

    fn check_artifact(&self, artifact: &Self::Artifact) -> bool {
        artifact.is_valid()
    }

    fn release_artifact(&self, artifact: Self::Artifact) {
        drop(artifact);
        self.released.fetch_add(1, Ordering::SeqCst);
    }

    fn produce_bytes(&self) -> Option<Vec<u8>> {
        self.prove().map(|artifact| artifact.to_bytes())
    }

    fn check_bytes(&self, proof: &[u8]) -> bool {
        TransparentArtifact::from_bytes(proof).is_some_and(|artifact| artifact.is_valid())
    }
}
