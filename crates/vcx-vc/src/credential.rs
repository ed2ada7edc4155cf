//! # Verifiable Credential structure and issuance
//!
//! Defines [`VerifiableCredential`] and the issuer-side
//! [`CredentialBuilder`].
//!
//! ## Security Invariants
//!
//! - **Issuance** serializes the unsigned credential, signs it through
//!   [`sign_document`] (canonical bytes with the proof metadata merged in),
//!   and only then attaches the proof. The typed struct and the signed JSON
//!   agree field for field, so `serde_json::to_value(&vc)` verifies.
//! - `credentialSubject.id` is always the requested subject. A caller
//!   supplied `id` among the claims is dropped.
//! - `issuanceDate` and `proof.created` come from the same clock reading.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use vcx_core::{Clock, Did, SystemClock, Timestamp, VerificationMethodId};
use vcx_crypto::{Ed25519KeyPair, Ed25519PublicKey};

use crate::error::VcError;
use crate::integrity::sign_document;
use crate::proof::{Proof, ProofOptions, ProofPurpose};

/// JSON-LD context shared by credentials and presentations.
pub const CREDENTIALS_V2_CONTEXT: &str = "https://www.w3.org/ns/credentials/v2";

/// Base type every credential lists first.
pub const VERIFIABLE_CREDENTIAL_TYPE: &str = "VerifiableCredential";

/// A W3C Verifiable Credential as issued by [`CredentialBuilder`].
///
/// Verification never goes through this type; it runs on the received
/// `serde_json::Value`. The struct exists so issuers and tests can build and
/// inspect credentials with types instead of string keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiableCredential {
    /// JSON-LD context URIs.
    #[serde(rename = "@context")]
    pub context: Vec<String>,

    /// `urn:uuid:<v4>`.
    pub id: String,

    /// Credential types, `"VerifiableCredential"` first.
    #[serde(rename = "type")]
    pub credential_type: Vec<String>,

    /// DID of the credential issuer.
    pub issuer: Did,

    pub issuance_date: Timestamp,

    /// Subject claims. Always contains `id`.
    pub credential_subject: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<Proof>,
}

impl VerifiableCredential {
    /// The first type entry other than `"VerifiableCredential"`, or
    /// `"VerifiableCredential"` if there is none.
    pub fn credential_type_label(&self) -> &str {
        self.credential_type
            .iter()
            .map(String::as_str)
            .find(|t| *t != VERIFIABLE_CREDENTIAL_TYPE)
            .unwrap_or(VERIFIABLE_CREDENTIAL_TYPE)
    }

    /// The subject DID, if present.
    pub fn subject_id(&self) -> Option<&str> {
        self.credential_subject.get("id").and_then(Value::as_str)
    }

    /// The JSON form that travels between roles and gets verified.
    pub fn to_value(&self) -> Result<Value, VcError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Parse a received credential.
    pub fn from_value(value: Value) -> Result<Self, VcError> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Issues signed credentials on behalf of one issuer identity.
///
/// Holds the issuer's key pair; the verification method id is derived once
/// from the public key and the issuer DID.
pub struct CredentialBuilder {
    issuer: Did,
    key: Ed25519KeyPair,
    verification_method: VerificationMethodId,
    clock: Arc<dyn Clock>,
}

impl CredentialBuilder {
    /// A builder that stamps credentials with the system clock.
    ///
    /// Fails with [`VcError::KeyFormat`] if the public key has no SPKI form.
    pub fn new(issuer: Did, key: Ed25519KeyPair) -> Result<Self, VcError> {
        let verification_method = key.public_key().verification_method(&issuer)?;
        Ok(Self {
            issuer,
            key,
            verification_method,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the clock used for `issuanceDate` and `proof.created`.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn issuer(&self) -> &Did {
        &self.issuer
    }

    pub fn verification_method(&self) -> &VerificationMethodId {
        &self.verification_method
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        self.key.public_key()
    }

    /// Issue a credential of `credential_type` to `subject_id`.
    ///
    /// `type` is `["VerifiableCredential", credential_type]`, collapsed to
    /// `["VerifiableCredential"]` when `credential_type` is the base type
    /// itself. `subject_data` keys follow `id` in `credentialSubject`.
    pub fn issue(
        &self,
        subject_id: &Did,
        credential_type: &str,
        subject_data: &Map<String, Value>,
    ) -> Result<VerifiableCredential, VcError> {
        let now = self.clock.now();

        let mut credential_subject = Map::new();
        credential_subject.insert("id".to_string(), Value::String(subject_id.to_string()));
        for (key, value) in subject_data {
            if key != "id" {
                credential_subject.insert(key.clone(), value.clone());
            }
        }

        let mut types = vec![VERIFIABLE_CREDENTIAL_TYPE.to_string()];
        if credential_type != VERIFIABLE_CREDENTIAL_TYPE {
            types.push(credential_type.to_string());
        }

        let mut vc = VerifiableCredential {
            context: vec![CREDENTIALS_V2_CONTEXT.to_string()],
            id: format!("urn:uuid:{}", uuid::Uuid::new_v4()),
            credential_type: types,
            issuer: self.issuer.clone(),
            issuance_date: now,
            credential_subject,
            proof: None,
        };

        let options = ProofOptions::eddsa_jcs_2022(
            self.verification_method.clone(),
            ProofPurpose::AssertionMethod,
            now,
        );
        let proof_value = sign_document(&vc.to_value()?, &options, &self.key)?;
        vc.proof = Some(options.with_value(proof_value));

        tracing::debug!(
            credential_id = %vc.id,
            subject = %subject_id,
            credential_type = %vc.credential_type_label(),
            "issued credential"
        );
        Ok(vc)
    }
}

impl std::fmt::Debug for CredentialBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialBuilder")
            .field("issuer", &self.issuer)
            .field("verification_method", &self.verification_method)
            .finish_non_exhaustive()
    }
}
