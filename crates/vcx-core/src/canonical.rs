//! # Canonical Serialization: Byte-Stable Signing Input
//!
//! This module defines `CanonicalBytes`, the sole construction path for bytes
//! that are signed or verified anywhere in the workspace.
//!
//! ## Security Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only ways to
//! construct it are [`CanonicalBytes::new()`] and [`canonicalize()`], both of
//! which run the same serializer. Any function that signs or verifies must accept
//! `&CanonicalBytes`, so signing input can never come from an ad-hoc
//! `serde_json::to_vec()` whose key order depends on how the map was built.
//!
//! ## Rules
//!
//! Output is JCS (RFC 8785) as produced by `serde_jcs`:
//!
//! 1. **Objects**: keys sorted, values canonicalized recursively.
//! 2. **Arrays**: element order preserved, elements canonicalized.
//! 3. **Whitespace**: none. Separators are `,` and `:`.
//! 4. **Strings**: minimal JSON escaping. Non-ASCII characters are emitted
//!    as raw UTF-8.
//!
//! Key order never depends on how the map was built, so `serde_json`'s
//! `preserve_order` feature cannot leak into signing input.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by the JCS serializer.
///
/// # Invariants
///
/// - The only constructors are [`CanonicalBytes::new()`] and [`canonicalize()`].
/// - Object keys appear in code-point order at every depth.
/// - The byte sequence is a single compact JSON text and valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(String);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalizationError::SerializationFailed`] if the value
    /// has no JSON form (for example a map with non-string keys).
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        Ok(Self(serde_jcs::to_string(obj)?))
    }

    /// Access the canonical bytes for signing or verification.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Access the canonical form as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Display for CanonicalBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonicalize a JSON tree.
pub fn canonicalize(value: &Value) -> Result<CanonicalBytes, CanonicalizationError> {
    CanonicalBytes::new(value)
}
