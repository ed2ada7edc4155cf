//! Errors for documents that cannot be signed or checked.
//!
//! A document that is well-formed but carries a bad signature is not an
//! error here; verification reports it as `Ok(false)`.

use thiserror::Error;

/// Errors from proof signing and verification.
#[derive(Error, Debug)]
pub enum VcError {
    /// The document (or its `proof`) does not have the shape a signed
    /// document must have.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// The document has no `proof`, or the proof has no `proofValue`.
    #[error("document is missing a proof or proofValue")]
    MissingProof,

    /// A public or private key could not be decoded.
    #[error("key format error: {0}")]
    KeyFormat(#[from] vcx_crypto::CryptoError),

    /// Canonicalization of the signing input failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] vcx_core::CanonicalizationError),

    /// A typed credential or presentation could not be converted to or
    /// from JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VcError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedDocument(_) | Self::Json(_) => "MALFORMED_DOCUMENT",
            Self::MissingProof => "MISSING_PROOF",
            Self::KeyFormat(_) => "KEY_FORMAT_ERROR",
            Self::Canonicalization(_) => "CANONICALIZATION_FAILED",
        }
    }
}
