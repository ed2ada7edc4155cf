//! Tampering helpers for test suites.
//!
//! Compiled only under `cfg(test)` or the `test-fixtures` feature. Nothing
//! in the signing or verification path depends on this module.

use serde_json::Value;

/// Replacement value written into every tampered subject claim.
pub const TAMPERED_CLAIM: &str = "meow";

/// A copy of `credential` with a fresh `urn:uuid` id and every
/// `credentialSubject` claim except `id` overwritten with
/// [`TAMPERED_CLAIM`]. The proof is left as it was, so the copy no longer
/// verifies.
pub fn tamper_subject(credential: &Value) -> Value {
    let mut copy = credential.clone();
    if let Some(obj) = copy.as_object_mut() {
        obj.insert(
            "id".to_string(),
            Value::String(format!("urn:uuid:{}", uuid::Uuid::new_v4())),
        );
        if let Some(Value::Object(subject)) = obj.get_mut("credentialSubject") {
            for (key, value) in subject.iter_mut() {
                if key != "id" {
                    *value = Value::String(TAMPERED_CLAIM.to_string());
                }
            }
        }
    }
    copy
}

/// Overwrite one subject claim in place, keeping everything else.
pub fn set_subject_claim(credential: &mut Value, key: &str, value: Value) {
    if let Some(Value::Object(subject)) = credential.get_mut("credentialSubject") {
        subject.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tamper_keeps_subject_id_and_proof() {
        let original = json!({
            "id": "urn:uuid:1",
            "credentialSubject": {"id": "did:holder", "name": "Alice", "age": 30},
            "proof": {"proofValue": "abc"}
        });
        let tampered = tamper_subject(&original);
        assert_ne!(tampered["id"], original["id"]);
        assert_eq!(tampered["credentialSubject"]["id"], "did:holder");
        assert_eq!(tampered["credentialSubject"]["name"], TAMPERED_CLAIM);
        assert_eq!(tampered["credentialSubject"]["age"], TAMPERED_CLAIM);
        assert_eq!(tampered["proof"], original["proof"]);
        assert_eq!(original["credentialSubject"]["name"], "Alice");
    }

    #[test]
    fn set_claim_overwrites_one_field() {
        let mut vc = json!({"credentialSubject": {"id": "did:holder", "name": "Alice"}});
        set_subject_claim(&mut vc, "name", json!("Mallory"));
        assert_eq!(vc["credentialSubject"], json!({"id": "did:holder", "name": "Mallory"}));
    }
}
