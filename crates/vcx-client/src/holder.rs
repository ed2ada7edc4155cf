//! Typed client for the holder service.

use serde_json::Value;

use crate::error::ClientError;
use crate::http::{decode, send, url_for};
use crate::types::PublicKeyResponse;

/// Client for the holder's `/present`, `/public-key` and `/store` endpoints.
#[derive(Debug, Clone)]
pub struct HolderClient {
    http: reqwest::Client,
    base_url: url::Url,
    max_retries: u32,
}

impl HolderClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url, max_retries: u32) -> Self {
        Self {
            http,
            base_url,
            max_retries,
        }
    }

    /// A freshly signed presentation of the holder's wallet.
    ///
    /// An empty wallet is answered with 404 and surfaces as
    /// [`ClientError::ApiError`].
    pub async fn presentation(&self) -> Result<Value, ClientError> {
        let endpoint = "GET holder /present";
        let url = url_for(&self.base_url, "/present");

        let resp = send(endpoint, self.max_retries, || self.http.get(&url).send()).await?;
        decode(endpoint, resp).await
    }

    /// The holder's base64 SPKI public key.
    pub async fn public_key(&self) -> Result<String, ClientError> {
        let endpoint = "GET holder /public-key";
        let url = url_for(&self.base_url, "/public-key");

        let resp = send(endpoint, self.max_retries, || self.http.get(&url).send()).await?;
        let key: PublicKeyResponse = decode(endpoint, resp).await?;
        Ok(key.public_key_base64)
    }

    /// Replace the holder's wallet with `credentials` (one credential object
    /// or an array of them).
    pub async fn store(&self, credentials: &Value) -> Result<(), ClientError> {
        let endpoint = "POST holder /store";
        let url = url_for(&self.base_url, "/store");

        send(endpoint, self.max_retries, || self.http.post(&url).json(credentials).send()).await?;
        Ok(())
    }
}
