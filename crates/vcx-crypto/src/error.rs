//! Errors raised while decoding keys and signatures or checking signatures.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Input was not standard, padded base64.
    #[error("invalid base64: {0}")]
    InvalidBase64(String),

    /// Decoded bytes are not a valid SPKI or PKCS#8 Ed25519 key.
    #[error("invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    /// Decoded signature is not 64 bytes.
    #[error("signature must be 64 bytes, got {0}")]
    InvalidSignatureLength(usize),

    #[error("signature verification failed: {0}")]
    VerificationFailed(String),
}
