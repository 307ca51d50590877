//! # zkrpc-store: Proof Handle Registry
//!
//! Maps application-issued [`ProofId`](zkrpc_core::ProofId)s to proof
//! objects owned by the proving backend. Callers never see the objects;
//! they only hold identities.
//!
//! ## Lifecycle
//!
//! ```text
//! generate ──▶ live ──verify*──▶ live ──free / close──▶ released
//! ```
//!
//! ## Concurrency
//!
//! One registry mutex guards the identity map and the sequence counter.
//! Each entry additionally sits behind its own `RwLock`, so verification
//! runs outside the registry lock while `free` still waits for in-flight
//! verifications of the same identity before releasing.

pub mod registry;
pub mod store;

pub use registry::ProofRegistry;
pub use store::HandleStore;
