//! # Ed25519 Signing and Verification
//!
//! Provides Ed25519 key generation, signing, and verification for Data
//! Integrity proofs.
//!
//! ## Security Invariant
//!
//! - Signing input MUST be `&CanonicalBytes`. You cannot sign raw bytes, so
//!   every signature covers JCS canonical bytes.
//! - Private keys are never serialized implicitly or logged.
//!   `Ed25519KeyPair` does not implement `Serialize`; exporting the private
//!   half is an explicit call, and `EncodedKeyPair`'s `Debug` redacts it.
//! - Signatures are pure Ed25519 over the message (no prehash).
//!
//! ## Transport Encoding
//!
//! - Public keys: base64 (standard alphabet, padded) of SubjectPublicKeyInfo
//!   DER. This string is also the input to the key fingerprint.
//! - Private keys: base64 of PKCS#8 v1 DER.
//! - Signatures: base64 of the 64 raw signature bytes.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ed25519_dalek::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use ed25519_dalek::{Signer, Verifier};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use vcx_core::{CanonicalBytes, Did, VerificationMethodId};

use crate::error::CryptoError;
use crate::sha256::sha256_hex;

/// Hex characters of the key fingerprint kept in a verification method id.
const FINGERPRINT_HEX_LEN: usize = 16;

/// An Ed25519 public key for signature verification.
///
/// Serializes as the base64 SPKI string.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ed25519PublicKey(ed25519_dalek::VerifyingKey);

/// An Ed25519 signature (64 bytes). Serializes as base64.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ed25519Signature([u8; 64]);

/// An Ed25519 key pair for signing operations.
///
/// Does not implement `Serialize`. Use [`Ed25519KeyPair::encoded()`] when
/// the key pair genuinely has to be written out (for example `vcx keygen`).
pub struct Ed25519KeyPair {
    signing_key: ed25519_dalek::SigningKey,
}

/// The `{publicKey, privateKey}` transport form of a key pair.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedKeyPair {
    /// Base64 SPKI DER.
    pub public_key: String,
    /// Base64 PKCS#8 DER.
    pub private_key: String,
}

// ---------------------------------------------------------------------------
// Ed25519PublicKey impls
// ---------------------------------------------------------------------------

impl Ed25519PublicKey {
    /// SubjectPublicKeyInfo DER (RFC 8410).
    pub fn to_spki_der(&self) -> Result<Vec<u8>, CryptoError> {
        let doc = self
            .0
            .to_public_key_der()
            .map_err(|e| CryptoError::InvalidKeyEncoding(format!("SPKI: {e}")))?;
        Ok(doc.as_bytes().to_vec())
    }

    /// Base64 of the SubjectPublicKeyInfo DER; the wire form of the key.
    pub fn to_spki_base64(&self) -> Result<String, CryptoError> {
        Ok(STANDARD.encode(self.to_spki_der()?))
    }

    /// Parse a public key from SubjectPublicKeyInfo DER.
    pub fn from_spki_der(der: &[u8]) -> Result<Self, CryptoError> {
        ed25519_dalek::VerifyingKey::from_public_key_der(der)
            .map(Self)
            .map_err(|e| CryptoError::InvalidKeyEncoding(format!("SPKI: {e}")))
    }

    /// Parse a public key from its base64 SPKI wire form.
    pub fn from_spki_base64(b64: &str) -> Result<Self, CryptoError> {
        let der = STANDARD
            .decode(b64.trim())
            .map_err(|e| CryptoError::InvalidBase64(e.to_string()))?;
        Self::from_spki_der(&der)
    }

    /// First 16 hex characters of SHA-256 over the base64 SPKI text.
    ///
    /// The hash covers the base64 string rather than the DER bytes so that
    /// any party holding only the wire form derives the same fragment.
    pub fn fingerprint(&self) -> Result<String, CryptoError> {
        let mut hex = sha256_hex(self.to_spki_base64()?.as_bytes());
        hex.truncate(FINGERPRINT_HEX_LEN);
        Ok(hex)
    }

    /// `"<did>#<fingerprint>"`, a pure function of owner and key.
    pub fn verification_method(&self, did: &Did) -> Result<VerificationMethodId, CryptoError> {
        Ok(VerificationMethodId::from_parts(did, &self.fingerprint()?))
    }
}

impl Serialize for Ed25519PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let b64 = self.to_spki_base64().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&b64)
    }
}

impl<'de> Deserialize<'de> for Ed25519PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let b64 = String::deserialize(deserializer)?;
        Self::from_spki_base64(&b64).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519PublicKey({}...)", hex_prefix(self.0.as_bytes()))
    }
}

impl std::fmt::Display for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let b64 = self.to_spki_base64().map_err(|_| std::fmt::Error)?;
        f.write_str(&b64)
    }
}

// ---------------------------------------------------------------------------
// Ed25519Signature impls
// ---------------------------------------------------------------------------

impl Ed25519Signature {
    /// Build a signature from a decoded byte slice of any length.
    ///
    /// # Errors
    ///
    /// [`CryptoError::InvalidSignatureLength`] unless the slice is 64 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; 64] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidSignatureLength(bytes.len()))?;
        Ok(Self(arr))
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }

    /// Parse a base64 signature.
    pub fn from_base64(b64: &str) -> Result<Self, CryptoError> {
        let bytes = STANDARD
            .decode(b64.trim())
            .map_err(|e| CryptoError::InvalidBase64(e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

impl Serialize for Ed25519Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for Ed25519Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let b64 = String::deserialize(deserializer)?;
        Self::from_base64(&b64).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519Signature({}...)", hex_prefix(&self.0))
    }
}

impl std::fmt::Display for Ed25519Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_base64())
    }
}

// ---------------------------------------------------------------------------
// Ed25519KeyPair impls
// ---------------------------------------------------------------------------

impl Ed25519KeyPair {
    /// Generate a new random Ed25519 key pair.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        let signing_key = ed25519_dalek::SigningKey::generate(&mut csprng);
        Self { signing_key }
    }

    /// Create a key pair from raw 32-byte private key seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = ed25519_dalek::SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// Load a key pair from base64 PKCS#8 DER.
    pub fn from_pkcs8_base64(b64: &str) -> Result<Self, CryptoError> {
        let der = STANDARD
            .decode(b64.trim())
            .map_err(|e| CryptoError::InvalidBase64(e.to_string()))?;
        let signing_key = ed25519_dalek::SigningKey::from_pkcs8_der(&der)
            .map_err(|e| CryptoError::InvalidKeyEncoding(format!("PKCS#8: {e}")))?;
        Ok(Self { signing_key })
    }

    /// Load a key pair from its `{publicKey, privateKey}` form, checking that
    /// the two halves belong together.
    pub fn from_encoded(encoded: &EncodedKeyPair) -> Result<Self, CryptoError> {
        let kp = Self::from_pkcs8_base64(&encoded.private_key)?;
        let public = Ed25519PublicKey::from_spki_base64(&encoded.public_key)?;
        if kp.public_key() != public {
            return Err(CryptoError::InvalidKeyEncoding(
                "public key does not match private key".to_string(),
            ));
        }
        Ok(kp)
    }

    /// Export the private key as base64 PKCS#8 DER.
    pub fn export_private_key_base64(&self) -> Result<String, CryptoError> {
        let doc = self
            .signing_key
            .to_pkcs8_der()
            .map_err(|e| CryptoError::InvalidKeyEncoding(format!("PKCS#8: {e}")))?;
        Ok(STANDARD.encode(doc.as_bytes()))
    }

    /// Both halves in transport form.
    pub fn encoded(&self) -> Result<EncodedKeyPair, CryptoError> {
        Ok(EncodedKeyPair {
            public_key: self.public_key().to_spki_base64()?,
            private_key: self.export_private_key_base64()?,
        })
    }

    /// Get the public key from this key pair.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key())
    }

    /// Sign canonical bytes.
    ///
    /// Ed25519 is deterministic: the same key and bytes always give the
    /// same signature.
    pub fn sign(&self, data: &CanonicalBytes) -> Ed25519Signature {
        let sig = self.signing_key.sign(data.as_bytes());
        Ed25519Signature(sig.to_bytes())
    }
}

impl std::fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519KeyPair(<private>)")
    }
}

impl std::fmt::Debug for EncodedKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodedKeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Verify an Ed25519 signature over canonical bytes.
///
/// Returns `Ok(())` if valid, `Err(CryptoError::VerificationFailed)`
/// otherwise.
pub fn verify(
    data: &CanonicalBytes,
    signature: &Ed25519Signature,
    public_key: &Ed25519PublicKey,
) -> Result<(), CryptoError> {
    let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    public_key
        .0
        .verify(data.as_bytes(), &sig)
        .map_err(|e| CryptoError::VerificationFailed(format!("Ed25519 verification failed: {e}")))
}

fn hex_prefix(bytes: &[u8]) -> String {
    bytes.iter().take(4).map(|b| format!("{b:02x}")).collect()
}
