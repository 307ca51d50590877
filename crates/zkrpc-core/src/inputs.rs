//! # Circuit Inputs
//!
//! The numeric inputs of the R1CS example circuit. On the wire the third
//! value is named `const`, which is a Rust keyword, hence the rename.

use serde::{Deserialize, Serialize};

/// The `(a, b, const)` triple configured into the prover before each run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CircuitInputs {
    /// Left multiplicand.
    pub a: u64,
    /// Right multiplicand.
    pub b: u64,
    /// Constant added to the product. Serialized as `const`.
    #[serde(rename = "const")]
    pub const_val: u64,
}

impl CircuitInputs {
    /// Inputs for the statement `out = a * b + const_val`.
    pub fn new(a: u64, b: u64, const_val: u64) -> Self {
        Self { a, b, const_val }
    }
}
