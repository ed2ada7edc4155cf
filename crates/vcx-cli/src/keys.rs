//! # Key Subcommand
//!
//! `vcx keygen` writes a fresh Ed25519 key pair in the transport form the
//! services use on the wire:
//!
//! ```json
//! { "publicKey": "<base64 SPKI DER>", "privateKey": "<base64 PKCS#8 DER>" }
//! ```
//!
//! The same file is accepted by `vcx sign --key` and by the `--key` flag of
//! the issuer and holder services.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use vcx_crypto::{EncodedKeyPair, Ed25519KeyPair};

/// Arguments for `vcx keygen`.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Write the key pair here instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Generate a key pair and print or write it.
pub fn run_keygen(args: &KeygenArgs) -> Result<u8> {
    let encoded = Ed25519KeyPair::generate().encoded()?;
    let json = serde_json::to_string_pretty(&encoded)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write key pair: {}", path.display()))?;
            println!("OK: generated Ed25519 key pair");
            println!("  File:       {}", path.display());
            println!("  Public key: {}", encoded.public_key);
        }
        None => println!("{json}"),
    }
    Ok(0)
}

/// Load a key pair written by `vcx keygen`.
pub fn load_key_pair(path: &Path) -> Result<Ed25519KeyPair> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read key pair: {}", path.display()))?;
    let encoded: EncodedKeyPair = serde_json::from_str(&content)
        .with_context(|| format!("not a key pair file: {}", path.display()))?;
    Ed25519KeyPair::from_encoded(&encoded)
        .with_context(|| format!("invalid key pair: {}", path.display()))
}

/// The key pair at `path`, or a fresh one for this process when `None`.
pub fn key_pair_or_generate(path: Option<&Path>) -> Result<Ed25519KeyPair> {
    match path {
        Some(p) => load_key_pair(p),
        None => Ok(Ed25519KeyPair::generate()),
    }
}
