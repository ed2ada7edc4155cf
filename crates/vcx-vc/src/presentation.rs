//! # Verifiable Presentations
//!
//! A presentation wraps the holder's credentials and is signed by the holder
//! with `proofPurpose = authentication`. Embedded credentials are carried as
//! raw JSON so that every field their issuer signed survives untouched; the
//! builder does not re-validate them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use vcx_core::{Clock, Did, SystemClock, VerificationMethodId};
use vcx_crypto::{Ed25519KeyPair, Ed25519PublicKey};

use crate::credential::CREDENTIALS_V2_CONTEXT;
use crate::error::VcError;
use crate::integrity::sign_document;
use crate::proof::{Proof, ProofOptions, ProofPurpose};

pub const VERIFIABLE_PRESENTATION_TYPE: &str = "VerifiablePresentation";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiablePresentation {
    #[serde(rename = "@context")]
    pub context: Vec<String>,

    #[serde(rename = "type")]
    pub presentation_type: Vec<String>,

    /// DID of the presenting holder.
    pub holder: Did,

    /// Embedded credentials in presentation order.
    pub verifiable_credential: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<Proof>,
}

impl VerifiablePresentation {
    pub fn to_value(&self) -> Result<Value, VcError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Signs presentations on behalf of one holder identity.
pub struct PresentationBuilder {
    holder: Did,
    key: Ed25519KeyPair,
    verification_method: VerificationMethodId,
    clock: Arc<dyn Clock>,
}

impl PresentationBuilder {
    pub fn new(holder: Did, key: Ed25519KeyPair) -> Result<Self, VcError> {
        let verification_method = key.public_key().verification_method(&holder)?;
        Ok(Self {
            holder,
            key,
            verification_method,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the clock used for `proof.created`.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn holder(&self) -> &Did {
        &self.holder
    }

    pub fn verification_method(&self) -> &VerificationMethodId {
        &self.verification_method
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        self.key.public_key()
    }

    /// Wrap `credentials` (order kept) and sign as the holder.
    pub fn present(&self, credentials: Vec<Value>) -> Result<VerifiablePresentation, VcError> {
        let mut vp = VerifiablePresentation {
            context: vec![CREDENTIALS_V2_CONTEXT.to_string()],
            presentation_type: vec![VERIFIABLE_PRESENTATION_TYPE.to_string()],
            holder: self.holder.clone(),
            verifiable_credential: credentials,
            proof: None,
        };

        let options = ProofOptions::eddsa_jcs_2022(
            self.verification_method.clone(),
            ProofPurpose::Authentication,
            self.clock.now(),
        );
        let proof_value = sign_document(&vp.to_value()?, &options, &self.key)?;
        vp.proof = Some(options.with_value(proof_value));

        tracing::debug!(
            holder = %self.holder,
            credentials = vp.verifiable_credential.len(),
            "signed presentation"
        );
        Ok(vp)
    }
}

impl std::fmt::Debug for PresentationBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresentationBuilder")
            .field("holder", &self.holder)
            .field("verification_method", &self.verification_method)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrity::verify_document;
    use serde_json::json;
    use vcx_core::{FixedClock, Timestamp};

    fn builder() -> PresentationBuilder {
        PresentationBuilder::new(Did::web_localhost(3002), Ed25519KeyPair::from_seed(&[2u8; 32]))
            .unwrap()
            .with_clock(FixedClock::new(Timestamp::parse("2026-02-01T09:30:00Z").unwrap()))
    }

    #[test]
    fn presentation_wraps_credentials_in_order() {
        let creds = vec![json!({"id": "urn:1"}), json!({"id": "urn:2"}), json!({"id": "urn:3"})];
        let vp = builder().present(creds.clone()).unwrap();
        assert_eq!(vp.verifiable_credential, creds);
        assert_eq!(vp.presentation_type, vec!["VerifiablePresentation"]);
        assert_eq!(vp.holder.as_str(), "did:web:localhost:3002");
        assert_eq!(vp.context, vec![CREDENTIALS_V2_CONTEXT]);
    }

    #[test]
    fn presentation_is_signed_for_authentication() {
        let b = builder();
        let vp = b.present(vec![json!({"anything": true})]).unwrap();
        let proof = vp.proof.as_ref().unwrap();
        assert_eq!(proof.options.proof_purpose, ProofPurpose::Authentication);
        assert_eq!(proof.options.created.to_iso8601(), "2026-02-01T09:30:00Z");
        assert!(verify_document(&vp.to_value().unwrap(), &b.public_key()).unwrap());
    }

    #[test]
    fn fixed_clock_makes_presentations_reproducible() {
        let creds = vec![json!({"id": "urn:1"})];
        let a = builder().present(creds.clone()).unwrap();
        let b = builder().present(creds).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn swapping_embedded_credentials_breaks_holder_proof() {
        let b = builder();
        let mut vp = b
            .present(vec![json!({"id": "urn:1"}), json!({"id": "urn:2"})])
            .unwrap()
            .to_value()
            .unwrap();
        let list = vp["verifiableCredential"].as_array_mut().unwrap();
        list.swap(0, 1);
        assert!(!verify_document(&vp, &b.public_key()).unwrap());
    }

    #[test]
    fn empty_presentation_can_still_be_signed() {
        let vp = builder().present(Vec::new()).unwrap();
        assert!(vp.verifiable_credential.is_empty());
        assert!(vp.proof.is_some());
    }
}
