//! # Holder Endpoints
//!
//! - `POST /store`: Replace the wallet with the posted credential(s).
//! - `GET /present`: Sign a presentation of the whole wallet.
//! - `GET /public-key`: The holder's SPKI public key, base64.
//!
//! Stored credentials are not checked here. The holder keeps whatever it
//! was given; catching a bad credential is the verifier's job.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

use vcx_client::PublicKeyResponse;
use vcx_vc::{VcError, VerifiablePresentation, Wallet};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::HolderState;

/// Build the holder router.
pub fn router() -> Router<HolderState> {
    Router::new()
        .route("/store", post(store))
        .route("/present", get(present))
        .route("/public-key", get(public_key))
}

/// POST /store: Body is one credential object or an array of them.
async fn store(
    State(state): State<HolderState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, &'static str), AppError> {
    let credentials = Wallet::credentials_from_body(extract_json(body)?)?;
    let count = state.store(credentials);
    tracing::info!(count, "wallet replaced");
    Ok((StatusCode::OK, "Credentials stored"))
}

/// GET /present: 404 while the wallet is empty.
async fn present(
    State(state): State<HolderState>,
) -> Result<Json<VerifiablePresentation>, AppError> {
    let credentials = state.credentials();
    if credentials.is_empty() {
        return Err(AppError::NotFound("No credentials to present.".to_string()));
    }
    let vp = state.builder.present(credentials)?;
    Ok(Json(vp))
}

/// GET /public-key
async fn public_key(State(state): State<HolderState>) -> Result<Json<PublicKeyResponse>, AppError> {
    let public_key_base64 = state
        .builder
        .public_key()
        .to_spki_base64()
        .map_err(VcError::from)?;
    Ok(Json(PublicKeyResponse { public_key_base64 }))
}
