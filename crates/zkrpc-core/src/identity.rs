//! # Proof Identity Newtype
//!
//! A [`ProofId`] is opaque to callers. It is only meaningful to the store
//! that issued it; the store allocates them from a monotonically increasing
//! sequence so an identity is never reissued within a store's lifetime.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix of every store-issued identity.
const PROOF_ID_PREFIX: &str = "p-";

/// Caller-visible token naming one live proof artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProofId(String);

impl ProofId {
    /// Build the identity for the `sequence`-th successful generation.
    pub fn from_sequence(sequence: u64) -> Self {
        Self(format!("{PROOF_ID_PREFIX}{sequence}"))
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProofId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProofId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ProofId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
