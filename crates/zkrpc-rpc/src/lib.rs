//! # zkrpc-rpc: Stream JSON-RPC Adapter
//!
//! Serves the proof handle registry over persistent TCP connections.
//! Each accepted connection gets its own task; requests on one connection
//! are answered in order.
//!
//! ## Wire Protocol
//!
//! Newline-delimited JSON, one object per line:
//!
//! ```text
//! → {"method":"ZK.Generate","params":[{"a":1,"b":2,"const":3}],"id":1}
//! ← {"id":1,"result":{"proof_id":"p-1"},"error":null}
//! → {"method":"ZK.Verify","params":[{"proof_id":"p-9"}],"id":2}
//! ← {"id":2,"result":null,"error":{"code":"UNKNOWN_IDENTITY","message":"unknown proof id: p-9"}}
//! ```
//!
//! | Method         | Params                  | Result                                  |
//! |----------------|-------------------------|-----------------------------------------|
//! | `ZK.Generate`  | `{a, b, const}`         | `{proof_id}`                            |
//! | `ZK.Verify`    | `{proof_id}`            | `{ok}`                                  |
//! | `ZK.Free`      | `{proof_id}`            | `{}`                                    |
//! | `ZK.SubmitJob` | `{a, b, const_val}`     | `{proof, prover_ms, error?}` (stateless)|
//! | `ZK.VerifyJob` | `{proof}`               | `{verified, verifier_ms}` (stateless)   |
//!
//! `params` may be the argument object itself or a one-element array.
//! The `ZK.` prefix is optional.

pub mod config;
pub mod protocol;
pub mod server;
pub mod service;

pub use config::{ConfigError, RpcConfig};
pub use server::{serve_connection, serve_with_shutdown};
pub use service::ZkService;
