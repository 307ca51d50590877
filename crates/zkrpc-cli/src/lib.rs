//! # zkrpc-cli: Command-Line Tool
//!
//! Provides the `zkrpc` binary for exercising a prover without a server.
//!
//! ## Subcommands
//!
//! - `zkrpc demo`: Stateless generate + verify with timings.
//! - `zkrpc lifecycle`: Generate, verify, free through a handle store.
//! - `zkrpc prove`: Write a base64 proof to a file.
//! - `zkrpc verify`: Check a base64 proof file (exit 0 valid, 2 rejected).
//!
//! ```bash
//! zkrpc demo --a 232312 --b 13131 --const 1424124
//! zkrpc prove --a 1 --b 2 --const 3 --out proof.b64
//! zkrpc verify proof.b64
//! ```

pub mod demo;
pub mod proof;

use clap::Args;
use zkrpc_core::CircuitInputs;

/// Exit code for a proof that decoded but did not verify.
pub const EXIT_REJECTED: u8 = 2;

/// Circuit inputs shared by the proving subcommands.
#[derive(Args, Debug, Clone, Copy)]
pub struct InputArgs {
    /// Left multiplicand.
    #[arg(long, default_value_t = 232312)]
    pub a: u64,
    /// Right multiplicand.
    #[arg(long, default_value_t = 13131)]
    pub b: u64,
    /// Added constant.
    #[arg(long = "const", default_value_t = 1424124)]
    pub const_val: u64,
}

impl From<InputArgs> for CircuitInputs {
    fn from(args: InputArgs) -> Self {
        CircuitInputs::new(args.a, args.b, args.const_val)
    }
}
