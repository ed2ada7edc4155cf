//! # Application State
//!
//! One state type per role, passed to handlers via the `State` extractor.
//! Every field sits behind an `Arc`, so cloning a state per request is
//! cheap and every clone sees the same keys and wallet.
//!
//! The holder's wallet lock is a `parking_lot::RwLock`. It is never held
//! across an `.await`, and a panicking writer does not poison it.

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Map, Value};

use vcx_client::{ClientError, ExchangeClient, IssuerClient};
use vcx_vc::{CredentialBuilder, PresentationBuilder, VerificationAggregator, Wallet};

/// State for the issuer role.
#[derive(Debug, Clone)]
pub struct IssuerState {
    pub builder: Arc<CredentialBuilder>,
    /// Type issued by `POST /issue`, e.g. `"EmployeeID"`.
    pub credential_type: Arc<str>,
    /// Claims merged into every issued `credentialSubject`.
    pub claims: Arc<Map<String, Value>>,
}

impl IssuerState {
    pub fn new(
        builder: CredentialBuilder,
        credential_type: impl Into<Arc<str>>,
        claims: Map<String, Value>,
    ) -> Self {
        Self {
            builder: Arc::new(builder),
            credential_type: credential_type.into(),
            claims: Arc::new(claims),
        }
    }
}

/// State for the holder role.
#[derive(Debug, Clone)]
pub struct HolderState {
    pub builder: Arc<PresentationBuilder>,
    pub wallet: Arc<RwLock<Wallet>>,
}

impl HolderState {
    /// A holder with an empty wallet.
    pub fn new(builder: PresentationBuilder) -> Self {
        Self {
            builder: Arc::new(builder),
            wallet: Arc::new(RwLock::new(Wallet::new())),
        }
    }

    /// Replace the wallet contents. Returns the number stored.
    pub fn store(&self, credentials: Vec<Value>) -> usize {
        let count = credentials.len();
        self.wallet.write().replace(credentials);
        count
    }

    /// Snapshot of the wallet, taken without holding the lock afterwards.
    pub fn credentials(&self) -> Vec<Value> {
        self.wallet.read().credentials().to_vec()
    }

    /// Ask `issuer` for a credential about this holder's own DID and store
    /// it as the wallet's only entry.
    pub async fn request_initial_credential(&self, issuer: &IssuerClient) -> Result<(), ClientError> {
        let credential = issuer.request_credential(self.builder.holder()).await?;
        self.store(vec![credential]);
        tracing::info!(holder = %self.builder.holder(), "stored credential obtained from issuer");
        Ok(())
    }
}

/// State for the verifier role.
#[derive(Debug, Clone)]
pub struct VerifierState {
    pub aggregator: Arc<VerificationAggregator<ExchangeClient>>,
}

impl VerifierState {
    pub fn new(client: ExchangeClient) -> Self {
        Self {
            aggregator: Arc::new(VerificationAggregator::new(client)),
        }
    }
}
