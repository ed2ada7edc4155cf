//! The holder's credential store.
//!
//! Starts empty. Every store event replaces the whole contents; nothing is
//! ever appended. Credentials are kept as received JSON so their proofs stay
//! checkable byte for byte.

use serde_json::Value;

use crate::error::VcError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wallet {
    credentials: Vec<Value>,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the wallet contents with `credentials`.
    pub fn replace(&mut self, credentials: Vec<Value>) {
        self.credentials = credentials;
    }

    pub fn credentials(&self) -> &[Value] {
        &self.credentials
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    /// Interpret a store request body: a single credential object or an
    /// array of them.
    ///
    /// # Errors
    ///
    /// [`VcError::MalformedDocument`] if the body, or any array element, is
    /// not a JSON object.
    pub fn credentials_from_body(body: Value) -> Result<Vec<Value>, VcError> {
        let list = match body {
            Value::Array(items) => items,
            obj @ Value::Object(_) => vec![obj],
            _ => {
                return Err(VcError::MalformedDocument(
                    "expected a credential object or an array of credentials".to_string(),
                ))
            }
        };
        if let Some(pos) = list.iter().position(|v| !v.is_object()) {
            return Err(VcError::MalformedDocument(format!(
                "credential at index {pos} is not a JSON object"
            )));
        }
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn starts_empty() {
        let wallet = Wallet::new();
        assert!(wallet.is_empty());
        assert_eq!(wallet.len(), 0);
    }

    #[test]
    fn store_replaces_rather_than_appends() {
        let mut wallet = Wallet::new();
        wallet.replace(vec![json!({"id": "a"}), json!({"id": "b"})]);
        assert_eq!(wallet.len(), 2);
        wallet.replace(vec![json!({"id": "c"})]);
        assert_eq!(wallet.credentials(), &[json!({"id": "c"})]);
    }

    #[test]
    fn body_may_be_single_or_array() {
        assert_eq!(Wallet::credentials_from_body(json!({"id": "a"})).unwrap().len(), 1);
        assert_eq!(
            Wallet::credentials_from_body(json!([{"id": "a"}, {"id": "b"}])).unwrap().len(),
            2
        );
        assert!(Wallet::credentials_from_body(json!([])).unwrap().is_empty());
    }

    #[test]
    fn body_rejects_non_objects() {
        assert!(matches!(
            Wallet::credentials_from_body(json!("vc")),
            Err(VcError::MalformedDocument(_))
        ));
        assert!(matches!(
            Wallet::credentials_from_body(json!([{"id": "a"}, 7])),
            Err(VcError::MalformedDocument(_))
        ));
    }
}
