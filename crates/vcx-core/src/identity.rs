//! # Identity Newtypes
//!
//! Owner identities and verification method references. These prevent
//! accidental identifier confusion: a `VerificationMethodId` cannot be passed
//! where the issuer or holder `Did` is expected, and neither can an arbitrary
//! string.
//!
//! Only the syntax is checked. DIDs are never resolved; the public key that
//! backs a verification method is obtained out of band.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A decentralized identifier, `did:<method>[:<method-specific-id>]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Did(String);

impl Did {
    /// Validate and wrap a DID string.
    ///
    /// Anything after `did:` is accepted as long as it is non-empty and
    /// free of whitespace and `#`, so both `did:holder` and
    /// `did:web:localhost:3001` are valid. The `#` is reserved for
    /// verification method fragments.
    pub fn new(s: impl Into<String>) -> Result<Self, ValidationError> {
        let s = s.into();
        let valid = s.strip_prefix("did:").is_some_and(|rest| {
            !rest.is_empty() && !rest.contains(char::is_whitespace) && !rest.contains('#')
        });
        if !valid {
            return Err(ValidationError::InvalidDid(s));
        }
        Ok(Self(s))
    }

    /// `did:web:<host>:<port>`, the identity each local role runs under.
    pub fn web_localhost(port: u16) -> Self {
        Self(format!("did:web:localhost:{port}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Did {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Did {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Did> for String {
    fn from(did: Did) -> Self {
        did.0
    }
}

/// A reference to the key that produced a proof, `<did>#<fragment>`.
///
/// Keys derived locally use the first 16 hex characters of the SHA-256 of
/// the key's transport encoding as the fragment; see
/// `vcx_crypto::Ed25519PublicKey::verification_method`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VerificationMethodId(String);

impl VerificationMethodId {
    /// Join an owner identity and a key fragment.
    pub fn from_parts(did: &Did, fragment: &str) -> Self {
        Self(format!("{did}#{fragment}"))
    }

    /// Parse a `<did>#<fragment>` reference.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let (did, fragment) = s
            .split_once('#')
            .ok_or_else(|| ValidationError::InvalidVerificationMethod(s.to_string()))?;
        if fragment.is_empty() || Did::new(did).is_err() {
            return Err(ValidationError::InvalidVerificationMethod(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VerificationMethodId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for VerificationMethodId {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<VerificationMethodId> for String {
    fn from(vm: VerificationMethodId) -> Self {
        vm.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn did_web_with_port_is_valid() {
        let did = Did::new("did:web:localhost:3001").unwrap();
        assert_eq!(did.as_str(), "did:web:localhost:3001");
        assert_eq!(did, Did::web_localhost(3001));
    }

    #[test]
    fn did_without_method_specific_id_is_valid() {
        let did = Did::new("did:holder").unwrap();
        assert_eq!(did.as_str(), "did:holder");
        assert_eq!(did.to_string(), "did:holder");
        assert!(VerificationMethodId::parse("did:holder#abc").is_ok());
    }

    #[test]
    fn did_rejects_bad_shapes() {
        for bad in ["", "did:", "web:x", "not a did", "localhost", "did:web: x", "did:web:a#b"] {
            assert!(
                matches!(Did::new(bad), Err(ValidationError::InvalidDid(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn did_serde_is_transparent_string() {
        let did = Did::new("did:key:z6Mk").unwrap();
        let json = serde_json::to_string(&did).unwrap();
        assert_eq!(json, "\"did:key:z6Mk\"");
        let back: Did = serde_json::from_str(&json).unwrap();
        assert_eq!(back, did);
        assert!(serde_json::from_str::<Did>("\"alice\"").is_err());
    }

    #[test]
    fn did_from_str() {
        let did: Did = "did:example:123".parse().unwrap();
        assert_eq!(did.to_string(), "did:example:123");
    }

    #[test]
    fn verification_method_from_parts() {
        let did = Did::web_localhost(3002);
        let vm = VerificationMethodId::from_parts(&did, "0123456789abcdef");
        assert_eq!(vm.as_str(), "did:web:localhost:3002#0123456789abcdef");
        assert_eq!(vm.to_string(), vm.as_str());
    }

    #[test]
    fn verification_method_parse() {
        assert!(VerificationMethodId::parse("did:web:localhost:3001#abc").is_ok());
        assert!(VerificationMethodId::parse("did:web:localhost:3001").is_err());
        assert!(VerificationMethodId::parse("did:web:localhost:3001#").is_err());
        assert!(VerificationMethodId::parse("nope#abc").is_err());
    }

    #[test]
    fn verification_method_serde_roundtrip() {
        let vm = VerificationMethodId::parse("did:web:localhost:3001#ff00").unwrap();
        let json = serde_json::to_value(&vm).unwrap();
        assert_eq!(json, serde_json::json!("did:web:localhost:3001#ff00"));
        let back: VerificationMethodId = serde_json::from_value(json).unwrap();
        assert_eq!(back, vm);
    }
}
