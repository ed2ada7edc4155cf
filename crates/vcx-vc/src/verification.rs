//! # Verification aggregation
//!
//! Combines the holder's presentation proof and every embedded credential's
//! proof into one decision.
//!
//! ## Stages
//!
//! ```text
//! FetchPresentation → VerifyPresentationProof → ExtractCredentials
//!   → FetchIssuerKey → VerifyEachCredential (×N) → Aggregate
//! ```
//!
//! ## Two channels
//!
//! - **Hard** ([`VerificationError`]): fetch failures, undecodable keys,
//!   structurally broken documents, an unauthenticated holder, or an empty
//!   credential list. Processing stops and no aggregate is produced.
//! - **Soft** ([`VerificationResult::is_valid`]): a credential whose
//!   signature does not match. It is recorded and the loop continues.
//!
//! `overallResult` is `VALID` iff every credential passed.

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use vcx_crypto::{CryptoError, Ed25519PublicKey};

use crate::credential::VERIFIABLE_CREDENTIAL_TYPE;
use crate::error::VcError;
use crate::integrity::verify_document;

/// Outcome of one credential check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    /// First `type` entry other than `"VerifiableCredential"`.
    pub credential_type: String,
    /// `credentialSubject` exactly as received.
    pub credential_subject: Value,
    pub is_valid: bool,
}

/// Closed set of aggregate outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallResult {
    Valid,
    ContainsInvalid,
}

impl std::fmt::Display for OverallResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverallResult::Valid => write!(f, "VALID"),
            OverallResult::ContainsInvalid => write!(f, "CONTAINS_INVALID"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateVerificationResult {
    pub overall_result: OverallResult,
    /// One entry per credential, in presentation order.
    pub verification_details: Vec<VerificationResult>,
}

impl AggregateVerificationResult {
    /// Fold per-credential results into an aggregate.
    pub fn from_details(verification_details: Vec<VerificationResult>) -> Self {
        let overall_result = if verification_details.iter().all(|r| r.is_valid) {
            OverallResult::Valid
        } else {
            OverallResult::ContainsInvalid
        };
        Self {
            overall_result,
            verification_details,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.overall_result == OverallResult::Valid
    }

    /// Number of credentials that failed their check.
    pub fn invalid_count(&self) -> usize {
        self.verification_details.iter().filter(|r| !r.is_valid).count()
    }
}

/// Stages of a verification run, used for tracing and error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStage {
    FetchPresentation,
    VerifyPresentationProof,
    ExtractCredentials,
    FetchIssuerKey,
    VerifyEachCredential,
    Aggregate,
}

impl VerificationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FetchPresentation => "fetch_presentation",
            Self::VerifyPresentationProof => "verify_presentation_proof",
            Self::ExtractCredentials => "extract_credentials",
            Self::FetchIssuerKey => "fetch_issuer_key",
            Self::VerifyEachCredential => "verify_each_credential",
            Self::Aggregate => "aggregate",
        }
    }
}

impl std::fmt::Display for VerificationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A collaborator fetch that did not produce a usable response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{endpoint}: {message}")]
pub struct FetchError {
    /// What was being fetched (`holder /present`, `issuer /public-key`, ...).
    pub endpoint: String,
    pub message: String,
}

impl FetchError {
    pub fn new(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }
}

/// Fatal verification outcomes. No aggregate is produced for any of these.
#[derive(Error, Debug)]
pub enum VerificationError {
    /// A presentation or credential could not be checked at all.
    #[error("{0}")]
    Document(#[from] VcError),

    /// The holder's presentation proof did not verify.
    #[error("holder presentation signature is invalid")]
    HolderUnauthenticated,

    /// The presentation carries no credentials.
    #[error("no credentials found in the presentation")]
    EmptyCredentialSet,

    /// A collaborator could not be reached or answered unusably.
    #[error("network failure during {stage}: {source}")]
    NetworkFailure {
        stage: VerificationStage,
        #[source]
        source: FetchError,
    },

    /// A fetched public key could not be decoded.
    #[error("{party} public key is malformed: {source}")]
    KeyFormat {
        party: &'static str,
        #[source]
        source: CryptoError,
    },
}

impl VerificationError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Document(e) => e.code(),
            Self::HolderUnauthenticated => "HOLDER_UNAUTHENTICATED",
            Self::EmptyCredentialSet => "EMPTY_CREDENTIAL_SET",
            Self::NetworkFailure { .. } => "NETWORK_FAILURE",
            Self::KeyFormat { .. } => "KEY_FORMAT_ERROR",
        }
    }
}

/// Check the holder's proof on a presentation.
pub fn verify_presentation_proof(
    presentation: &Value,
    holder_key: &Ed25519PublicKey,
) -> Result<(), VerificationError> {
    if verify_document(presentation, holder_key)? {
        Ok(())
    } else {
        Err(VerificationError::HolderUnauthenticated)
    }
}

/// The embedded credential list. Absent, `null` or empty is fatal.
pub fn extract_credentials(presentation: &Value) -> Result<&[Value], VerificationError> {
    match presentation.get("verifiableCredential") {
        None | Some(Value::Null) => Err(VerificationError::EmptyCredentialSet),
        Some(Value::Array(list)) if list.is_empty() => Err(VerificationError::EmptyCredentialSet),
        Some(Value::Array(list)) => Ok(list),
        Some(_) => Err(VcError::MalformedDocument(
            "verifiableCredential must be an array".to_string(),
        )
        .into()),
    }
}

/// Check every credential with the issuer key, sequentially and in order.
///
/// A `false` is recorded and the loop continues. A structurally broken
/// credential aborts with its error.
pub fn verify_credentials(
    credentials: &[Value],
    issuer_key: &Ed25519PublicKey,
) -> Result<AggregateVerificationResult, VerificationError> {
    let mut details = Vec::with_capacity(credentials.len());
    for (index, vc) in credentials.iter().enumerate() {
        let is_valid = verify_document(vc, issuer_key)?;
        let credential_type = credential_type_of(vc);
        if is_valid {
            tracing::info!(credential = index + 1, %credential_type, "credential signature is valid");
        } else {
            tracing::warn!(credential = index + 1, %credential_type, "credential signature is INVALID");
        }
        details.push(VerificationResult {
            credential_type,
            credential_subject: vc.get("credentialSubject").cloned().unwrap_or(Value::Null),
            is_valid,
        });
    }
    Ok(AggregateVerificationResult::from_details(details))
}

/// Verify a presentation and all its credentials with already-known keys.
///
/// Pure and synchronous; [`VerificationAggregator`] wraps this with the
/// fetches.
pub fn aggregate_verify(
    presentation: &Value,
    holder_key: &Ed25519PublicKey,
    issuer_key: &Ed25519PublicKey,
) -> Result<AggregateVerificationResult, VerificationError> {
    verify_presentation_proof(presentation, holder_key)?;
    let credentials = extract_credentials(presentation)?;
    verify_credentials(credentials, issuer_key)
}

/// First `type` entry other than `"VerifiableCredential"`.
///
/// Accepts `type` as an array or a single string; anything else falls back
/// to `"VerifiableCredential"`.
pub fn credential_type_of(credential: &Value) -> String {
    let found = match credential.get("type") {
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != VERIFIABLE_CREDENTIAL_TYPE),
        Some(Value::String(t)) if t != VERIFIABLE_CREDENTIAL_TYPE => Some(t.as_str()),
        _ => None,
    };
    found.unwrap_or(VERIFIABLE_CREDENTIAL_TYPE).to_string()
}

/// Where the aggregator gets its inputs.
///
/// Keys are returned in their base64 SPKI wire form; the aggregator decodes
/// them so that a malformed key is reported as such.
pub trait CredentialSource {
    fn fetch_presentation(&self) -> impl Future<Output = Result<Value, FetchError>> + Send;
    fn fetch_holder_key(&self) -> impl Future<Output = Result<String, FetchError>> + Send;
    fn fetch_issuer_key(&self) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Runs the full verification flow against a [`CredentialSource`].
#[derive(Debug, Clone)]
pub struct VerificationAggregator<S> {
    source: S,
}

impl<S: CredentialSource> VerificationAggregator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Walk every stage. Fetches are awaited one at a time.
    pub async fn run(&self) -> Result<AggregateVerificationResult, VerificationError> {
        let stage = VerificationStage::FetchPresentation;
        tracing::info!(%stage, "requesting presentation from holder");
        let presentation = self
            .source
            .fetch_presentation()
            .await
            .map_err(|source| VerificationError::NetworkFailure { stage, source })?;

        let stage = VerificationStage::VerifyPresentationProof;
        tracing::info!(%stage, "verifying holder presentation proof");
        let holder_key = self
            .source
            .fetch_holder_key()
            .await
            .map_err(|source| VerificationError::NetworkFailure { stage, source })?;
        let holder_key = Ed25519PublicKey::from_spki_base64(&holder_key)
            .map_err(|source| VerificationError::KeyFormat { party: "holder", source })?;
        verify_presentation_proof(&presentation, &holder_key)?;
        let holder = presentation
            .get("holder")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("<unknown>");
        tracing::info!(%stage, holder, "presentation signature is valid");

        let stage = VerificationStage::ExtractCredentials;
        let credentials = extract_credentials(&presentation)?;
        tracing::info!(%stage, count = credentials.len(), "extracted credentials");

        let stage = VerificationStage::FetchIssuerKey;
        tracing::info!(%stage, "requesting issuer public key");
        let issuer_key = self
            .source
            .fetch_issuer_key()
            .await
            .map_err(|source| VerificationError::NetworkFailure { stage, source })?;
        let issuer_key = Ed25519PublicKey::from_spki_base64(&issuer_key)
            .map_err(|source| VerificationError::KeyFormat { party: "issuer", source })?;

        let stage = VerificationStage::VerifyEachCredential;
        tracing::info!(%stage, "verifying credential signatures");
        let aggregate = verify_credentials(credentials, &issuer_key)?;

        let stage = VerificationStage::Aggregate;
        tracing::info!(
            %stage,
            overall = %aggregate.overall_result,
            invalid = aggregate.invalid_count(),
            total = aggregate.verification_details.len(),
            "verification complete"
        );
        Ok(aggregate)
    }
}
