//! # vcx-client: Typed client for the issuer and holder services
//!
//! Provides typed access to the two services a verifier talks to:
//! - **Issuer**: `POST /issue`, `GET /public-key`
//! - **Holder**: `GET /present`, `GET /public-key`, `POST /store`
//!
//! [`ExchangeClient`] bundles both and implements
//! [`vcx_vc::CredentialSource`], so a
//! [`VerificationAggregator`](vcx_vc::VerificationAggregator) can run
//! against live services.
//!
//! Every failure (transport, timeout, non-2xx, undecodable body) is an
//! error naming the endpoint. Credentials and presentations are returned as
//! raw JSON so their proofs are checked over exactly what was sent.

pub mod config;
pub mod error;
pub mod holder;
mod http;
pub mod issuer;
pub(crate) mod retry;
pub mod types;

pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use holder::HolderClient;
pub use issuer::IssuerClient;
pub use types::{IssueRequest, PublicKeyResponse};

use serde_json::Value;
use vcx_vc::{CredentialSource, FetchError};

/// Issuer and holder clients sharing one connection pool.
#[derive(Debug, Clone)]
pub struct ExchangeClient {
    issuer: IssuerClient,
    holder: HolderClient,
}

impl ExchangeClient {
    /// Create a client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            issuer: IssuerClient::new(http.clone(), config.issuer_url, config.max_retries),
            holder: HolderClient::new(http, config.holder_url, config.max_retries),
        })
    }

    pub fn issuer(&self) -> &IssuerClient {
        &self.issuer
    }

    pub fn holder(&self) -> &HolderClient {
        &self.holder
    }
}

impl CredentialSource for ExchangeClient {
    async fn fetch_presentation(&self) -> Result<Value, FetchError> {
        Ok(self.holder.presentation().await?)
    }

    async fn fetch_holder_key(&self) -> Result<String, FetchError> {
        Ok(self.holder.public_key().await?)
    }

    async fn fetch_issuer_key(&self) -> Result<String, FetchError> {
        Ok(self.issuer.public_key().await?)
    }
}
