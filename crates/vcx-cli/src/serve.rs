//! # Service Subcommands
//!
//! `vcx issuer`, `vcx holder`, and `vcx verifier` each bind one role's
//! router from `vcx-api` and serve it until Ctrl-C.
//!
//! Each role runs as `did:web:localhost:<port>`. Keys come from `--key`
//! (a `vcx keygen` file) or are generated fresh for the process lifetime.
//!
//! Ports resolve as `--port`, then `PORT`, then the role default
//! (3001 / 3002 / 3003). Collaborator URLs for the holder and verifier
//! resolve as flag, then `VCX_ISSUER_URL` / `VCX_HOLDER_URL`, then the
//! local defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::{Map, Value};
use tokio::net::TcpListener;

use vcx_api::{HolderState, IssuerState, VerifierState};
use vcx_client::{ClientConfig, ExchangeClient};
use vcx_core::Did;
use vcx_vc::{CredentialBuilder, PresentationBuilder};

use crate::keys::key_pair_or_generate;

pub const DEFAULT_ISSUER_PORT: u16 = 3001;
pub const DEFAULT_HOLDER_PORT: u16 = 3002;
pub const DEFAULT_VERIFIER_PORT: u16 = 3003;

/// Arguments for `vcx issuer`.
#[derive(Args, Debug)]
pub struct IssuerArgs {
    #[arg(long)]
    pub port: Option<u16>,
    /// Credential type issued by `POST /issue`, e.g. `EmployeeID`.
    #[arg(long = "type", default_value = "VerifiableCredential")]
    pub credential_type: String,
    /// Subject claim as `key=value`. Repeatable.
    #[arg(long = "claim", value_parser = parse_claim)]
    pub claims: Vec<(String, String)>,
    /// Key pair file; a fresh key is generated when absent.
    #[arg(long)]
    pub key: Option<PathBuf>,
}

/// Arguments for `vcx holder`.
#[derive(Args, Debug)]
pub struct HolderArgs {
    #[arg(long)]
    pub port: Option<u16>,
    /// Issuer to request the bootstrap credential from.
    #[arg(long)]
    pub issuer_url: Option<String>,
    /// After binding, request a credential for this holder's DID and store it.
    #[arg(long)]
    pub request_on_start: bool,
    /// Key pair file; a fresh key is generated when absent.
    #[arg(long)]
    pub key: Option<PathBuf>,
}

/// Arguments for `vcx verifier`.
#[derive(Args, Debug)]
pub struct VerifierArgs {
    #[arg(long)]
    pub port: Option<u16>,
    #[arg(long)]
    pub issuer_url: Option<String>,
    #[arg(long)]
    pub holder_url: Option<String>,
}

pub async fn run_issuer(args: IssuerArgs) -> Result<u8> {
    let port = resolve_port(args.port, DEFAULT_ISSUER_PORT)?;
    let did = Did::web_localhost(port);
    let key = key_pair_or_generate(args.key.as_deref())?;
    let builder = CredentialBuilder::new(did.clone(), key)?;

    tracing::info!(
        issuer = %did,
        verification_method = %builder.verification_method(),
        credential_type = %args.credential_type,
        claims = args.claims.len(),
        "issuer configured"
    );

    let state = IssuerState::new(builder, args.credential_type, claims_map(args.claims));
    let listener = bind(port).await?;
    vcx_api::serve(listener, vcx_api::issuer_app(state)).await?;
    Ok(0)
}

pub async fn run_holder(args: HolderArgs) -> Result<u8> {
    let port = resolve_port(args.port, DEFAULT_HOLDER_PORT)?;
    let did = Did::web_localhost(port);
    let key = key_pair_or_generate(args.key.as_deref())?;
    let builder = PresentationBuilder::new(did.clone(), key)?;
    tracing::info!(
        holder = %did,
        verification_method = %builder.verification_method(),
        "holder configured"
    );

    let state = HolderState::new(builder);
    let listener = bind(port).await?;

    if args.request_on_start {
        let config = client_config(args.issuer_url.as_deref(), None)?;
        let client = ExchangeClient::new(config)?;
        let bootstrap = state.clone();
        tokio::spawn(async move {
            if let Err(e) = bootstrap.request_initial_credential(client.issuer()).await {
                tracing::error!(error = %e, "could not obtain a credential from the issuer");
            }
        });
    }

    vcx_api::serve(listener, vcx_api::holder_app(state)).await?;
    Ok(0)
}

pub async fn run_verifier(args: VerifierArgs) -> Result<u8> {
    let port = resolve_port(args.port, DEFAULT_VERIFIER_PORT)?;
    let config = client_config(args.issuer_url.as_deref(), args.holder_url.as_deref())?;
    tracing::info!(
        issuer = %config.issuer_url,
        holder = %config.holder_url,
        timeout = ?config.timeout,
        max_retries = config.max_retries,
        "verifier configured"
    );

    let state = VerifierState::new(ExchangeClient::new(config)?);
    let listener = bind(port).await?;
    vcx_api::serve(listener, vcx_api::verifier_app(state)).await?;
    Ok(0)
}

async fn bind(port: u16) -> Result<TcpListener> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))
}

/// `flag`, else `PORT`, else `default`.
fn resolve_port(flag: Option<u16>, default: u16) -> Result<u16> {
    if let Some(port) = flag {
        return Ok(port);
    }
    match std::env::var("PORT") {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("PORT is not a valid port: {raw:?}")),
        Err(_) => Ok(default),
    }
}

/// Environment configuration with explicit URL flags taking precedence.
fn client_config(issuer_url: Option<&str>, holder_url: Option<&str>) -> Result<ClientConfig> {
    let env = ClientConfig::from_env()?;
    let issuer = issuer_url.map_or_else(|| env.issuer_url.to_string(), str::to_string);
    let holder = holder_url.map_or_else(|| env.holder_url.to_string(), str::to_string);

    let mut config = ClientConfig::new(&issuer, &holder)?;
    config.timeout = env.timeout;
    config.max_retries = env.max_retries;
    Ok(config)
}

/// Parse a `--claim key=value` argument. Only the first `=` splits.
pub fn parse_claim(raw: &str) -> Result<(String, String)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("expected key=value, got {raw:?}");
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("claim key must not be empty");
    }
    if key == "id" {
        bail!("`id` is set to the requested subject and cannot be a claim");
    }
    Ok((key.to_string(), value.to_string()))
}

fn claims_map(claims: Vec<(String, String)>) -> Map<String, Value> {
    claims
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect()
}
