//! # Error Types
//!
//! Errors raised by the foundational types. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// The value could not be converted into a JSON tree.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// A domain primitive failed validation at construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The string is not a `did:` identifier.
    #[error("invalid DID {0:?}: expected did:<id> without whitespace or '#'")]
    InvalidDid(String),

    /// The string is not a `<did>#<fragment>` verification method reference.
    #[error("invalid verification method {0:?}: expected <did>#<fragment>")]
    InvalidVerificationMethod(String),

    /// The string is not an RFC 3339 UTC timestamp.
    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_did_display_names_input() {
        let err = ValidationError::InvalidDid("alice".to_string());
        assert!(format!("{err}").contains("\"alice\""));
    }

    #[test]
    fn invalid_timestamp_display_carries_reason() {
        let err = ValidationError::InvalidTimestamp {
            value: "yesterday".to_string(),
            reason: "not RFC 3339".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("yesterday"));
        assert!(msg.contains("not RFC 3339"));
    }

    #[test]
    fn serde_json_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CanonicalizationError::from(json_err);
        assert!(format!("{err}").starts_with("serialization failed"));
    }
}
