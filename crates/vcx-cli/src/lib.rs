//! # vcx-cli: The `vcx` command
//!
//! ## Subcommands
//!
//! - `vcx issuer` / `vcx holder` / `vcx verifier`: run one role's service.
//! - `vcx keygen`: generate an Ed25519 key pair as `{publicKey, privateKey}`.
//! - `vcx canonicalize`: print a document's canonical form.
//! - `vcx sign`: attach a Data Integrity proof to a document.
//! - `vcx verify`: check a signed document against a public key.
//!
//! Handlers return `anyhow::Result<u8>` where the `u8` is the process exit
//! code. `0` is success; `vcx verify` answers `2` for a signature that does
//! not match. Errors become exit code `1` in `main`.
//!
//! ```bash
//! vcx issuer --type EmployeeID --claim name=Alice --claim role=Engineer
//! vcx holder --request-on-start
//! vcx verifier
//! curl localhost:3003/verify
//! ```

pub mod document;
pub mod keys;
pub mod serve;

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Read and parse a JSON file.
pub fn read_json(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse JSON: {}", path.display()))
}
