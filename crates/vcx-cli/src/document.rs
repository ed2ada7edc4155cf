//! # Document Subcommands
//!
//! Offline access to the signing pipeline: canonicalize a document, attach
//! a Data Integrity proof, or verify one.
//!
//! `vcx verify` separates a signature that does not match (exit `2`) from a
//! document that cannot be checked at all (error, exit `1`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use vcx_core::{canonicalize, Did, Timestamp};
use vcx_crypto::Ed25519KeyPair;
use vcx_vc::{attach_proof, verify_document_with_spki, ProofOptions, ProofPurpose};

use crate::keys::load_key_pair;
use crate::read_json;

/// Arguments for `vcx canonicalize`.
#[derive(Args, Debug)]
pub struct CanonicalizeArgs {
    /// JSON document to canonicalize.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Arguments for `vcx sign`.
#[derive(Args, Debug)]
pub struct SignArgs {
    /// Key pair file written by `vcx keygen`.
    #[arg(long)]
    pub key: PathBuf,
    /// DID that controls the key; the verification method hangs off it.
    #[arg(long)]
    pub did: String,
    /// `assertionMethod` for credentials, `authentication` for presentations.
    #[arg(long, default_value = "assertionMethod")]
    pub purpose: String,
    /// JSON document to sign.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Arguments for `vcx verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Signer's public key, base64 SPKI DER.
    #[arg(long)]
    pub pubkey: String,
    /// Signed JSON document.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

pub fn run_canonicalize(args: &CanonicalizeArgs) -> Result<u8> {
    let value = read_json(&args.file)?;
    println!("{}", canonicalize(&value)?);
    Ok(0)
}

pub fn run_sign(args: &SignArgs) -> Result<u8> {
    let key = load_key_pair(&args.key)?;
    let signed = sign_file(&args.file, &key, &args.did, &args.purpose, Timestamp::now())?;
    println!("{}", serde_json::to_string_pretty(&signed)?);
    Ok(0)
}

pub fn run_verify(args: &VerifyArgs) -> Result<u8> {
    let document = read_json(&args.file)?;
    let valid = verify_document_with_spki(&document, args.pubkey.trim())
        .with_context(|| format!("cannot verify {}", args.file.display()))?;

    if valid {
        println!("OK: signature is valid");
        Ok(0)
    } else {
        println!("FAIL: signature does not match the document");
        Ok(2)
    }
}

/// Sign the document at `path` as `did` with `key`.
fn sign_file(
    path: &Path,
    key: &Ed25519KeyPair,
    did: &str,
    purpose: &str,
    created: Timestamp,
) -> Result<serde_json::Value> {
    let did = Did::new(did).context("invalid --did")?;
    let purpose: ProofPurpose = purpose.parse().map_err(anyhow::Error::msg)?;
    let document = read_json(path)?;

    let verification_method = key.public_key().verification_method(&did)?;
    let options = ProofOptions::eddsa_jcs_2022(verification_method, purpose, created);
    tracing::debug!(verification_method = %options.verification_method, %purpose, "signing document");
    Ok(attach_proof(&document, &options, key)?)
}
