//! # Data Integrity proof objects
//!
//! The `proof` member attached to credentials and presentations:
//!
//! ```json
//! {
//!   "type": "DataIntegrityProof",
//!   "cryptosuite": "eddsa-jcs-2022",
//!   "created": "2026-01-15T12:00:00Z",
//!   "verificationMethod": "did:web:localhost:3001#0123456789abcdef",
//!   "proofPurpose": "assertionMethod",
//!   "proofValue": "<base64 Ed25519 signature>"
//! }
//! ```
//!
//! [`ProofOptions`] is everything except `proofValue`; it is the proof
//! metadata that gets signed. [`Proof`] is the options plus the signature.

use serde::{Deserialize, Serialize};

use vcx_core::{Timestamp, VerificationMethodId};

/// The proof type. Only Data Integrity proofs are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProofType {
    DataIntegrityProof,
}

impl std::fmt::Display for ProofType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProofType::DataIntegrityProof => write!(f, "DataIntegrityProof"),
        }
    }
}

/// The cryptosuite identifier carried in the proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cryptosuite {
    /// Ed25519 over JCS-style canonical JSON.
    #[serde(rename = "eddsa-jcs-2022")]
    EddsaJcs2022,
}

impl std::fmt::Display for Cryptosuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cryptosuite::EddsaJcs2022 => write!(f, "eddsa-jcs-2022"),
        }
    }
}

/// The purpose of a cryptographic proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProofPurpose {
    /// The issuer asserts the credential claims are true.
    AssertionMethod,
    /// The holder authenticates as the presenter.
    Authentication,
}

impl std::fmt::Display for ProofPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProofPurpose::AssertionMethod => write!(f, "assertionMethod"),
            ProofPurpose::Authentication => write!(f, "authentication"),
        }
    }
}

impl std::str::FromStr for ProofPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assertionMethod" => Ok(Self::AssertionMethod),
            "authentication" => Ok(Self::Authentication),
            other => Err(format!(
                "unknown proof purpose {other:?}, expected assertionMethod or authentication"
            )),
        }
    }
}

/// Proof metadata: every proof field except `proofValue`.
///
/// This is what the signer merges into the document under `proof` before
/// canonicalizing. The caller chooses `created` and `proof_purpose`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofOptions {
    #[serde(rename = "type")]
    pub proof_type: ProofType,
    pub cryptosuite: Cryptosuite,
    /// When the proof was created (UTC, truncated to seconds).
    pub created: Timestamp,
    /// DID URL of the signing key.
    pub verification_method: VerificationMethodId,
    pub proof_purpose: ProofPurpose,
}

impl ProofOptions {
    /// Options for an `eddsa-jcs-2022` Data Integrity proof.
    pub fn eddsa_jcs_2022(
        verification_method: VerificationMethodId,
        proof_purpose: ProofPurpose,
        created: Timestamp,
    ) -> Self {
        Self {
            proof_type: ProofType::DataIntegrityProof,
            cryptosuite: Cryptosuite::EddsaJcs2022,
            created,
            verification_method,
            proof_purpose,
        }
    }

    /// Attach a signature, producing the complete proof.
    pub fn with_value(self, proof_value: String) -> Proof {
        Proof {
            options: self,
            proof_value,
        }
    }
}

/// A complete Data Integrity proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    #[serde(flatten)]
    pub options: ProofOptions,

    /// Base64 Ed25519 signature (64 bytes, 88 characters).
    #[serde(rename = "proofValue")]
    pub proof_value: String,
}
