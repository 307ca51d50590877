//! # Prove / Verify Subcommands
//!
//! Proof files hold one line of standard-alphabet base64.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use clap::Args;
use zkrpc_core::CircuitInputs;
use zkrpc_prover::{ProofBackend, Prover, StatelessProver};

use crate::InputArgs;

#[derive(Args, Debug)]
pub struct ProveArgs {
    #[command(flatten)]
    pub inputs: InputArgs,
    /// File to write the base64 proof to.
    #[arg(long, value_name = "FILE")]
    pub out: PathBuf,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// File holding a base64 proof.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Execute `zkrpc prove`.
pub fn run_prove<B: ProofBackend>(args: &ProveArgs, prover: &Prover<B>) -> Result<u8> {
    let generated = prover
        .generate_stateless(&CircuitInputs::from(args.inputs))
        .context("stateless proof generation failed")?;
    write_proof(&args.out, &generated.proof)?;
    println!(
        "OK: wrote {}-byte proof to {} ({:.3} ms)",
        generated.proof.len(),
        args.out.display(),
        generated.prover_ms
    );
    Ok(0)
}

/// Execute `zkrpc verify`.
pub fn run_verify<B: ProofBackend>(args: &VerifyArgs, prover: &Prover<B>) -> Result<u8> {
    let proof = read_proof(&args.file)?;
    let verification = prover.verify_stateless(&proof);
    if verification.valid {
        println!("OK: proof verified ({:.3} ms)", verification.verifier_ms);
        Ok(0)
    } else {
        println!("REJECTED: proof did not verify");
        Ok(crate::EXIT_REJECTED)
    }
}

fn write_proof(path: &Path, proof: &[u8]) -> Result<()> {
    let mut encoded = STANDARD.encode(proof);
    encoded.push('\n');
    std::fs::write(path, encoded)
        .with_context(|| format!("failed to write proof file: {}", path.display()))
}

fn read_proof(path: &Path) -> Result<Vec<u8>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read proof file: {}", path.display()))?;
    STANDARD
        .decode(content.trim())
        .with_context(|| format!("proof file is not valid base64: {}", path.display()))
}
