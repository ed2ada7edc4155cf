//! # vcx-api: Axum services for the credential exchange
//!
//! Three independent services, one per role, each a plain [`axum::Router`]:
//!
//! - **Issuer** ([`issuer_app`]): signs credentials on request.
//! - **Holder** ([`holder_app`]): keeps a wallet and signs presentations.
//! - **Verifier** ([`verifier_app`]): fetches a presentation and the
//!   issuer's key, then reports the aggregate verdict.
//!
//! Every role also answers `GET /health/liveness`.
//!
//! ## Middleware Stack (Tower)
//!
//! `TraceLayer` on the role routes. Health probes sit outside it so probe
//! traffic stays out of the request log.
//!
//! ## Crate Policy
//!
//! - No signing or verification logic in handlers. They delegate to `vcx-vc`.
//! - All errors map to structured HTTP responses via [`AppError`].

pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use state::{HolderState, IssuerState, VerifierState};

/// Issuer service: `POST /issue`, `GET /public-key`.
pub fn issuer_app(state: IssuerState) -> Router {
    let api = routes::issuer::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);
    Router::new().merge(health()).merge(api)
}

/// Holder service: `POST /store`, `GET /present`, `GET /public-key`.
pub fn holder_app(state: HolderState) -> Router {
    let api = routes::holder::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);
    Router::new().merge(health()).merge(api)
}

/// Verifier service: `GET /verify`.
pub fn verifier_app(state: VerifierState) -> Router {
    let api = routes::verifier::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);
    Router::new().merge(health()).merge(api)
}

/// Serve `app` on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "listening");
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

fn health() -> Router {
    Router::new().route("/health/liveness", get(liveness))
}

/// Liveness probe: 200 while the process is running.
async fn liveness() -> &'static str {
    "ok"
}
