//! # zkrpc CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use zkrpc_cli::demo::{run_demo, run_lifecycle, DemoArgs, LifecycleArgs};
use zkrpc_cli::proof::{run_prove, run_verify, ProveArgs, VerifyArgs};
use zkrpc_prover::{ProofBackend, Prover};

#[cfg(feature = "libiop")]
type Backend = zkrpc_prover::libiop::LibiopBackend;
#[cfg(not(feature = "libiop"))]
type Backend = zkrpc_prover::TransparentBackend;

/// zkrpc: prove and verify `a * b + const` without a server.
#[derive(Parser, Debug)]
#[command(name = "zkrpc", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate and verify one proof on the stateless path, with timings.
    Demo(DemoArgs),

    /// Generate, verify, and free one proof through a handle store.
    Lifecycle(LifecycleArgs),

    /// Write a base64 proof for the given inputs to a file.
    Prove(ProveArgs),

    /// Verify a base64 proof file. Exits 2 if the proof is rejected.
    Verify(VerifyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let prover = Arc::new(Prover::new(Backend::default()));
    tracing::debug!(backend = prover.backend().name(), "zkrpc CLI starting");

    let result = match cli.command {
        Commands::Demo(args) => run_demo(&args, &prover),
        Commands::Lifecycle(args) => run_lifecycle(&args, &prover),
        Commands::Prove(args) => run_prove(&args, &prover),
        Commands::Verify(args) => run_verify(&args, &prover),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
