//! # vcx CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! The service subcommands get a multi-threaded Tokio runtime; the offline
//! document commands run synchronously.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vcx_cli::document::{
    run_canonicalize, run_sign, run_verify, CanonicalizeArgs, SignArgs, VerifyArgs,
};
use vcx_cli::keys::{run_keygen, KeygenArgs};
use vcx_cli::serve::{run_holder, run_issuer, run_verifier, HolderArgs, IssuerArgs, VerifierArgs};

/// Issue, hold, and verify W3C credentials with Data Integrity proofs
/// (Ed25519, eddsa-jcs-2022).
#[derive(Parser, Debug)]
#[command(name = "vcx", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the issuer service.
    Issuer(IssuerArgs),

    /// Run the holder service.
    Holder(HolderArgs),

    /// Run the verifier service.
    Verifier(VerifierArgs),

    /// Generate an Ed25519 key pair.
    Keygen(KeygenArgs),

    /// Print the canonical form of a JSON document.
    Canonicalize(CanonicalizeArgs),

    /// Attach a Data Integrity proof to a JSON document.
    Sign(SignArgs),

    /// Verify the Data Integrity proof on a JSON document.
    Verify(VerifyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json_logs);

    let result = match cli.command {
        Commands::Issuer(args) => block_on(run_issuer(args)),
        Commands::Holder(args) => block_on(run_holder(args)),
        Commands::Verifier(args) => block_on(run_verifier(args)),
        Commands::Keygen(args) => run_keygen(&args),
        Commands::Canonicalize(args) => run_canonicalize(&args),
        Commands::Sign(args) => run_sign(&args),
        Commands::Verify(args) => run_verify(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

/// `RUST_LOG` wins when set; otherwise `-v` counts pick the level.
fn init_tracing(verbose: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("info"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn block_on<F>(fut: F) -> anyhow::Result<u8>
where
    F: std::future::Future<Output = anyhow::Result<u8>>,
{
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(fut)
}
