//! # Native libiop Backend (feature `libiop`)
//!
//! Bindings to the Aurora zkSNARK prover exposed by `libzkffi_wrapper`.
//! The native library keeps its inputs in process-global state; the
//! [`Prover`](crate::Prover) wrapper serializes configure + produce.
//!
//! ## Linking
//!
//! Set `LIBIOP_FFI_DIR` to the directory holding `libzkffi_wrapper` when
//! building with `--features libiop`.

use std::marker::{PhantomData, PhantomPinned};
use std::ptr::{self, NonNull};

use zkrpc_core::CircuitInputs;

use crate::traits::ProofBackend;

/// Opaque native proof handle.
#[repr(C)]
pub struct ProofHandle {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

#[link(name = "zkffi_wrapper")]
extern "C" {
    fn set_r1cs_input_values(a: u64, b: u64, const_val: u64);
    fn generate_r1cs_proof_obj() -> *mut ProofHandle;
    fn verify_r1cs_proof_obj(proof: *mut ProofHandle) -> bool;
    fn free_proof_obj(proof: *mut ProofHandle);
    fn generate_r1cs_proof_bytes(out_buf: *mut *mut u8, out_len: *mut usize) -> bool;
    fn verify_r1cs_proof_bytes(buf: *const u8, len: usize) -> bool;
    fn free_buffer(buf: *mut u8);
}

/// Owned native proof object. Released exactly once through
/// [`ProofBackend::release_artifact`].
#[derive(Debug)]
pub struct LibiopArtifact(NonNull<ProofHandle>);

// SAFETY: the handle is a heap object owned by the native library with no
// thread affinity; ownership moves with this value.
unsafe impl Send for LibiopArtifact {}
// SAFETY: verification only reads the proof object.
unsafe impl Sync for LibiopArtifact {}

/// Backend calling the native prover.
#[derive(Debug, Default)]
pub struct LibiopBackend {
    _private: (),
}

impl LibiopBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProofBackend for LibiopBackend {
    type Artifact = LibiopArtifact;

    fn name(&self) -> &'static str {
        "libiop"
    }

    fn configure_inputs(&self, inputs: &CircuitInputs) {
        // SAFETY: plain integer arguments.
        unsafe { set_r1cs_input_values(inputs.a, inputs.b, inputs.const_val) }
    }

    fn produce_artifact(&self) -> Option<Self::Artifact> {
        // SAFETY: returns either NULL or a fresh handle we now own.
        let raw = unsafe { generate_r1cs_proof_obj() };
        NonNull::new(raw).map(LibiopArtifact)
    }

    fn check_artifact(&self, artifact: &Self::Artifact) -> bool {
        // SAFETY: the handle is live; it is only freed by `release_artifact`,
        // which consumes the artifact.
        unsafe { verify_r1cs_proof_obj(artifact.0.as_ptr()) }
    }

    fn release_artifact(&self, artifact: Self::Artifact) {
        // SAFETY: consuming `artifact` guarantees this is the only free.
        unsafe { free_proof_obj(artifact.0.as_ptr()) }
    }

    fn produce_bytes(&self) -> Option<Vec<u8>> {
        let mut buf: *mut u8 = ptr::null_mut();
        let mut len: usize = 0;
        // SAFETY: both out-pointers reference valid locals.
        let ok = unsafe { generate_r1cs_proof_bytes(&mut buf, &mut len) };
        if !ok {
            if !buf.is_null() {
                // SAFETY: buffer was allocated by the library.
                unsafe { free_buffer(buf) };
            }
            return None;
        }
        let bytes = if buf.is_null() || len == 0 {
            Vec::new()
        } else {
            // SAFETY: the library reports `len` initialized bytes at `buf`.
            unsafe { std::slice::from_raw_parts(buf, len) }.to_vec()
        };
        if !buf.is_null() {
            // SAFETY: copied above; freed once here.
            unsafe { free_buffer(buf) };
        }
        Some(bytes)
    }

    fn check_bytes(&self, proof: &[u8]) -> bool {
        let ptr = if proof.is_empty() {
            ptr::null()
        } else {
            proof.as_ptr()
        };
        // SAFETY: `ptr` is valid for `proof.len()` bytes for the call duration.
        unsafe { verify_r1cs_proof_bytes(ptr, proof.len()) }
    }
}
