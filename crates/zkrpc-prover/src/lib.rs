//! # zkrpc-prover: Proving Capability
//!
//! Wraps the external proving engine behind one trait and one serializing
//! wrapper, so every transport adapter reaches the engine the same way.
//!
//! ## Architecture
//!
//! - **Traits** (`traits.rs`): [`ProofBackend`] is the contract consumed
//!   from the engine: configure inputs, produce an artifact or bytes,
//!   check, release.
//!
//! - **Transparent** (`transparent.rs`): [`TransparentBackend`] produces
//!   deterministic SHA-256 commitment proofs in-process. No zero-knowledge
//!   guarantees; used when the native library is not linked and in tests.
//!
//! - **libiop** (`libiop.rs`, feature `libiop`): bindings to the native
//!   Aurora prover shipped as `libzkffi_wrapper`.
//!
//! - **Prover** (`prover.rs`): [`Prover`] owns the backend and the single
//!   critical section spanning input configuration and proof production.
//!
//! - **Stateless** (`stateless.rs`): [`StatelessProver`] is the direct
//!   invocation path returning serialized proofs with wall-clock timings.
//!
//! ## Crate Policy
//!
//! - `unsafe` is confined to `libiop.rs`.
//! - Backends never log proof bytes.

pub mod prover;
pub mod stateless;
pub mod traits;
pub mod transparent;

#[cfg(feature = "libiop")]
pub mod libiop;

pub use prover::Prover;
pub use stateless::{StatelessProof, StatelessProver, StatelessVerification};
pub use traits::ProofBackend;
pub use transparent::TransparentBackend;
