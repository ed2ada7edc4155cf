//! Typed client for the issuer service.

use serde_json::Value;
use vcx_core::Did;

use crate::error::ClientError;
use crate::http::{decode, send, url_for};
use crate::types::{IssueRequest, PublicKeyResponse};

/// Client for the issuer's `/issue` and `/public-key` endpoints.
#[derive(Debug, Clone)]
pub struct IssuerClient {
    http: reqwest::Client,
    base_url: url::Url,
    max_retries: u32,
}

impl IssuerClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url, max_retries: u32) -> Self {
        Self {
            http,
            base_url,
            max_retries,
        }
    }

    /// Ask the issuer for a credential about `subject_id`.
    ///
    /// The credential is returned as received so its proof stays checkable.
    pub async fn request_credential(&self, subject_id: &Did) -> Result<Value, ClientError> {
        let endpoint = "POST issuer /issue";
        let url = url_for(&self.base_url, "/issue");
        let body = IssueRequest {
            subject_id: subject_id.to_string(),
        };

        let resp = send(endpoint, self.max_retries, || self.http.post(&url).json(&body).send()).await?;
        decode(endpoint, resp).await
    }

    /// The issuer's base64 SPKI public key.
    pub async fn public_key(&self) -> Result<String, ClientError> {
        let endpoint = "GET issuer /public-key";
        let url = url_for(&self.base_url, "/public-key");

        let resp = send(endpoint, self.max_retries, || self.http.get(&url).send()).await?;
        let key: PublicKeyResponse = decode(endpoint, resp).await?;
        Ok(key.public_key_base64)
    }
}
