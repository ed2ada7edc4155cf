//! # vcx-crypto: Cryptographic Primitives
//!
//! Provides the cryptographic building blocks for the credential exchange:
//!
//! - **Ed25519** key generation, signing and verification. Signing input is
//!   always [`vcx_core::CanonicalBytes`].
//! - **Transport encoding** of keys: public keys as base64 SubjectPublicKeyInfo
//!   DER, private keys as base64 PKCS#8 DER, signatures as base64.
//! - **SHA-256** fingerprints used to derive verification method ids.
//!
//! ## Crate Policy
//!
//! - Depends only on `vcx-core` internally.
//! - No mocking of cryptographic operations in tests. All tests use real
//!   `CanonicalBytes`, real SHA-256, real Ed25519.
//! - Private key material never reaches `Debug`, `Display` or logs.

pub mod ed25519;
pub mod error;
pub mod sha256;

pub use ed25519::{verify, EncodedKeyPair, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
pub use error::CryptoError;
pub use sha256::sha256_hex;
