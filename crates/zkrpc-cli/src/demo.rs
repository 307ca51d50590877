//! # Demo Subcommands
//!
//! `demo` runs the stateless path once; `lifecycle` walks one proof through
//! a handle store and confirms the freed identity is gone.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use zkrpc_core::{CircuitInputs, StoreError};
use zkrpc_prover::{ProofBackend, Prover, StatelessProver};
use zkrpc_store::{HandleStore, ProofRegistry};

use crate::InputArgs;

#[derive(Args, Debug)]
pub struct DemoArgs {
    #[command(flatten)]
    pub inputs: InputArgs,
}

#[derive(Args, Debug)]
pub struct LifecycleArgs {
    #[command(flatten)]
    pub inputs: InputArgs,
}

/// Execute `zkrpc demo`.
pub fn run_demo<B: ProofBackend>(args: &DemoArgs, prover: &Prover<B>) -> Result<u8> {
    let inputs = CircuitInputs::from(args.inputs);
    let generated = prover
        .generate_stateless(&inputs)
        .context("stateless proof generation failed")?;
    println!(
        "generated {}-byte proof for {} * {} + {} in {:.3} ms",
        generated.proof.len(),
        inputs.a,
        inputs.b,
        inputs.const_val,
        generated.prover_ms
    );

    let verification = prover.verify_stateless(&generated.proof);
    println!(
        "verification: {} in {:.3} ms",
        if verification.valid { "VALID" } else { "INVALID" },
        verification.verifier_ms
    );

    Ok(if verification.valid {
        0
    } else {
        crate::EXIT_REJECTED
    })
}

/// Execute `zkrpc lifecycle`.
pub fn run_lifecycle<B: ProofBackend>(args: &LifecycleArgs, prover: &Arc<Prover<B>>) -> Result<u8> {
    let store = HandleStore::new(Arc::clone(prover));

    let id = store
        .generate(args.inputs.into())
        .context("generate through handle store failed")?;
    println!("generated {id}");

    let ok = store.verify(&id)?;
    println!("verify {id}: {ok}");
    if !ok {
        return Ok(crate::EXIT_REJECTED);
    }

    store.free(&id)?;
    println!("freed {id}");

    match store.verify(&id) {
        Err(StoreError::UnknownIdentity(_)) => println!("verify {id} after free: unknown identity"),
        other => bail!("freed identity {id} still resolves: {other:?}"),
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkrpc_prover::TransparentBackend;

    fn inputs() -> InputArgs {
        InputArgs {
            a: 232312,
            b: 13131,
            const_val: 1424124,
        }
    }

    #[test]
    fn demo_succeeds_with_transparent_backend() {
        let prover = Prover::new(TransparentBackend::new());
        let code = run_demo(&DemoArgs { inputs: inputs() }, &prover).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn demo_fails_when_generation_fails() {
        let prover = Prover::new(TransparentBackend::new());
        prover.backend().set_fail_generation(true);
        let err = run_demo(&DemoArgs { inputs: inputs() }, &prover).unwrap_err();
        assert!(format!("{err:#}").contains("generation failed"));
    }

    #[test]
    fn lifecycle_releases_its_proof() {
        let prover = Arc::new(Prover::new(TransparentBackend::new()));
        let code = run_lifecycle(&LifecycleArgs { inputs: inputs() }, &prover).unwrap();
        assert_eq!(code, 0);
        assert_eq!(prover.backend().produced(), 1);
        assert_eq!(prover.backend().live_artifacts(), 0);
    }
}
