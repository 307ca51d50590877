#![deny(missing_docs)]

//! # zkrpc-core: Foundational Types
//!
//! Shared vocabulary for every zkrpc crate:
//!
//! - [`ProofId`]: the caller-visible token naming one live proof artifact
//!   inside one handle store.
//! - [`CircuitInputs`]: the `(a, b, const)` triple fed to the prover.
//! - [`ProverError`], [`StoreError`], [`ZkError`]: the error taxonomy.
//!
//! ## Crate Policy
//!
//! - No dependencies on other zkrpc crates.
//! - No I/O, no locking, no logging.

pub mod error;
pub mod identity;
pub mod inputs;

pub use error::{ProverError, StoreError, ZkError};
pub use identity::ProofId;
pub use inputs::CircuitInputs;
