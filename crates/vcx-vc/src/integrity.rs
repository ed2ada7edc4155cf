//! # Sign and verify Data Integrity proofs over JSON documents
//!
//! ## Signing input
//!
//! For a document `D` and proof metadata `M` (the proof without
//! `proofValue`), the signed bytes are
//!
//! ```text
//! canonicalize({ ...D without "proof", "proof": M })
//! ```
//!
//! The signer builds `M` from [`ProofOptions`]. The verifier takes `M`
//! verbatim from the received proof minus `proofValue`, so any extra proof
//! fields a foreign signer added are covered too. Both sides therefore
//! reconstruct exactly the same byte sequence for an untouched document.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{Map, Value};

use vcx_core::{canonicalize, CanonicalBytes};
use vcx_crypto::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

use crate::error::VcError;
use crate::proof::ProofOptions;

const PROOF: &str = "proof";
const PROOF_VALUE: &str = "proofValue";

/// Canonical signing input for `document` under `options`.
///
/// Any `proof` already present on the document is replaced.
///
/// # Errors
///
/// [`VcError::MalformedDocument`] if `document` is not a JSON object.
pub fn signing_input(document: &Value, options: &ProofOptions) -> Result<CanonicalBytes, VcError> {
    let body = as_object(document, "document")?;
    let metadata = serde_json::to_value(options)?;
    input_from_parts(body, metadata)
}

/// Sign `document` with `key`, returning the base64 `proofValue`.
///
/// Deterministic in (document, options, key).
pub fn sign_document(
    document: &Value,
    options: &ProofOptions,
    key: &Ed25519KeyPair,
) -> Result<String, VcError> {
    let canonical = signing_input(document, options)?;
    Ok(key.sign(&canonical).to_base64())
}

/// Sign `document` and return a copy carrying the complete proof.
pub fn attach_proof(
    document: &Value,
    options: &ProofOptions,
    key: &Ed25519KeyPair,
) -> Result<Value, VcError> {
    let proof_value = sign_document(document, options, key)?;
    let proof = serde_json::to_value(options.clone().with_value(proof_value))?;

    let mut signed = as_object(document, "document")?.clone();
    signed.insert(PROOF.to_string(), proof);
    Ok(Value::Object(signed))
}

/// Check the proof on a signed document.
///
/// Returns `Ok(true)` if the signature verifies under `public_key`, and
/// `Ok(false)` if the document is structurally sound but the signature does
/// not match (tampered content, wrong key, or a decoded signature of the
/// wrong length).
///
/// # Errors
///
/// - [`VcError::MissingProof`] when `proof` is absent or `proofValue` is
///   absent or empty.
/// - [`VcError::MalformedDocument`] when the document or its proof is not
///   an object, or `proofValue` is not a base64 string.
pub fn verify_document(document: &Value, public_key: &Ed25519PublicKey) -> Result<bool, VcError> {
    let doc = as_object(document, "document")?;

    let proof = match doc.get(PROOF) {
        None | Some(Value::Null) => return Err(VcError::MissingProof),
        Some(p) => as_object(p, "proof")?,
    };

    let proof_value = match proof.get(PROOF_VALUE) {
        None | Some(Value::Null) => return Err(VcError::MissingProof),
        Some(Value::String(s)) if s.is_empty() => return Err(VcError::MissingProof),
        Some(Value::String(s)) => s,
        Some(_) => {
            return Err(VcError::MalformedDocument(
                "proofValue must be a string".to_string(),
            ))
        }
    };

    let signature_bytes = STANDARD
        .decode(proof_value)
        .map_err(|e| VcError::MalformedDocument(format!("proofValue is not base64: {e}")))?;
    let Ok(signature) = Ed25519Signature::from_slice(&signature_bytes) else {
        return Ok(false);
    };

    let mut metadata = proof.clone();
    metadata.remove(PROOF_VALUE);
    let canonical = input_from_parts(doc, Value::Object(metadata))?;

    Ok(vcx_crypto::verify(&canonical, &signature, public_key).is_ok())
}

/// Parse a base64 SPKI key and verify. Key decoding failures surface as
/// [`VcError::KeyFormat`].
pub fn verify_document_with_spki(document: &Value, public_key_b64: &str) -> Result<bool, VcError> {
    let key = Ed25519PublicKey::from_spki_base64(public_key_b64)?;
    verify_document(document, &key)
}

fn input_from_parts(body: &Map<String, Value>, metadata: Value) -> Result<CanonicalBytes, VcError> {
    let mut merged = body.clone();
    merged.insert(PROOF.to_string(), metadata);
    Ok(canonicalize(&Value::Object(merged))?)
}

fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>, VcError> {
    value
        .as_object()
        .ok_or_else(|| VcError::MalformedDocument(format!("{what} must be a JSON object")))
}
