//! # Issuer Endpoints
//!
//! - `POST /issue`: Sign a credential for the requested subject.
//! - `GET /public-key`: The issuer's SPKI public key, base64.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};

use vcx_client::{IssueRequest, PublicKeyResponse};
use vcx_core::Did;
use vcx_vc::{VcError, VerifiableCredential};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::IssuerState;

/// Build the issuer router.
pub fn router() -> Router<IssuerState> {
    Router::new()
        .route("/issue", post(issue))
        .route("/public-key", get(public_key))
}

/// POST /issue: Issue the configured credential type to `subjectId`.
///
/// The subject claims are fixed at startup; the request only chooses who
/// the credential is about.
async fn issue(
    State(state): State<IssuerState>,
    body: Result<Json<IssueRequest>, JsonRejection>,
) -> Result<Json<VerifiableCredential>, AppError> {
    let req = extract_json(body)?;
    let subject = Did::new(&req.subject_id)?;

    let vc = state
        .builder
        .issue(&subject, &state.credential_type, &state.claims)?;
    tracing::info!(credential_id = %vc.id, subject = %subject, "credential issued");
    Ok(Json(vc))
}

/// GET /public-key
async fn public_key(State(state): State<IssuerState>) -> Result<Json<PublicKeyResponse>, AppError> {
    let public_key_base64 = state
        .builder
        .public_key()
        .to_spki_base64()
        .map_err(VcError::from)?;
    Ok(Json(PublicKeyResponse { public_key_base64 }))
}
