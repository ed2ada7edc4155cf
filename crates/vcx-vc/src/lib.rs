//! # vcx-vc: Data Integrity Proofs for Credentials and Presentations
//!
//! Implements the credential exchange core:
//!
//! - **Proof objects** ([`Proof`], [`ProofOptions`]) for the
//!   `DataIntegrityProof` / `eddsa-jcs-2022` suite.
//! - **Sign and verify** over arbitrary JSON documents ([`sign_document`],
//!   [`attach_proof`], [`verify_document`]).
//! - **Builders** for issued credentials ([`CredentialBuilder`]) and holder
//!   presentations ([`PresentationBuilder`]).
//! - **Verification aggregation** ([`aggregate_verify`],
//!   [`VerificationAggregator`]) that folds the holder check and every
//!   credential check into one [`AggregateVerificationResult`].
//! - The holder's in-memory [`Wallet`].
//!
//! ## Security Invariants
//!
//! - All proof computation uses [`CanonicalBytes`](vcx_core::CanonicalBytes)
//!   for signing input, never raw `serde_json::to_vec()`.
//! - Verification runs on the document as received (`serde_json::Value`),
//!   so fields this crate does not model still count towards the signature.
//! - A signature that does not verify is a `false` result, not an error.
//!   Errors are reserved for documents that cannot be checked at all.

pub mod credential;
pub mod error;
#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;
pub mod integrity;
pub mod presentation;
pub mod proof;
pub mod verification;
pub mod wallet;

// Re-export primary types.
pub use credential::{CredentialBuilder, VerifiableCredential, CREDENTIALS_V2_CONTEXT};
pub use error::VcError;
pub use integrity::{
    attach_proof, sign_document, signing_input, verify_document, verify_document_with_spki,
};
pub use presentation::{PresentationBuilder, VerifiablePresentation};
pub use proof::{Cryptosuite, Proof, ProofOptions, ProofPurpose, ProofType};
pub use verification::{
    aggregate_verify, AggregateVerificationResult, CredentialSource, FetchError, OverallResult,
    VerificationAggregator, VerificationError, VerificationResult, VerificationStage,
};
pub use wallet::Wallet;
