//! Request and response bodies shared by the services and this client.

use serde::{Deserialize, Serialize};

/// `GET /public-key` response of the issuer and holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyResponse {
    /// Base64 SubjectPublicKeyInfo DER.
    pub public_key_base64: String,
}

/// `POST /issue` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRequest {
    pub subject_id: String,
}
