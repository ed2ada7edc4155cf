//! # Verifier Endpoint
//!
//! `GET /verify` pulls a presentation from the configured holder, the
//! issuer's key from the configured issuer, and answers with the aggregate.
//! A fatal stage failure is a 500 whose error code names the cause.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use vcx_vc::AggregateVerificationResult;

use crate::error::AppError;
use crate::state::VerifierState;

/// Build the verifier router.
pub fn router() -> Router<VerifierState> {
    Router::new().route("/verify", get(verify))
}

async fn verify(
    State(state): State<VerifierState>,
) -> Result<Json<AggregateVerificationResult>, AppError> {
    let result = state.aggregator.run().await?;
    Ok(Json(result))
}
