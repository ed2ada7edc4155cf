//! # Integration Tests for vcx-api
//!
//! Drives each role's router in-process with `tower::ServiceExt::oneshot`:
//! health probes, issuance, wallet replacement, presentation signing, and
//! the verifier's error envelope when its collaborators are unreachable.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Map, Value};
use tower::ServiceExt;

use vcx_api::{HolderState, IssuerState, VerifierState};
use vcx_client::{ClientConfig, ExchangeClient};
use vcx_core::{Did, FixedClock, Timestamp};
use vcx_crypto::{Ed25519KeyPair, Ed25519PublicKey};
use vcx_vc::{verify_document, CredentialBuilder, PresentationBuilder};

fn clock() -> FixedClock {
    FixedClock::new(Timestamp::parse("2026-03-01T08:00:00Z").unwrap())
}

fn issuer_state() -> IssuerState {
    let builder =
        CredentialBuilder::new(Did::web_localhost(3001), Ed25519KeyPair::from_seed(&[21u8; 32]))
            .unwrap()
            .with_clock(clock());
    let mut claims = Map::new();
    claims.insert("name".into(), json!("Alice"));
    claims.insert("role".into(), json!("Engineer"));
    IssuerState::new(builder, "EmployeeID", claims)
}

fn holder_state() -> HolderState {
    HolderState::new(
        PresentationBuilder::new(Did::web_localhost(3002), Ed25519KeyPair::from_seed(&[22u8; 32]))
            .unwrap()
            .with_clock(clock()),
    )
}

/// Helper: read response body as string.
async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::http::Response<Body>) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe_on_every_role() {
    let verifier = VerifierState::new(
        ExchangeClient::new(ClientConfig::new("http://127.0.0.1:9", "http://127.0.0.1:9").unwrap())
            .unwrap(),
    );
    let apps = [
        vcx_api::issuer_app(issuer_state()),
        vcx_api::holder_app(holder_state()),
        vcx_api::verifier_app(verifier),
    ];
    for app in apps {
        let response = app.oneshot(get("/health/liveness")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "ok");
    }
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = vcx_api::issuer_app(issuer_state());
    let response = app.oneshot(get("/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// -- Issuer -------------------------------------------------------------------

#[tokio::test]
async fn test_issue_returns_signed_credential() {
    let state = issuer_state();
    let issuer_key = state.builder.public_key();
    let app = vcx_api::issuer_app(state);

    let response = app
        .oneshot(post_json("/issue", &json!({"subjectId": "did:web:localhost:3002"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let vc = body_json(response).await;
    assert_eq!(vc["type"], json!(["VerifiableCredential", "EmployeeID"]));
    assert_eq!(vc["issuer"], "did:web:localhost:3001");
    assert_eq!(vc["credentialSubject"]["id"], "did:web:localhost:3002");
    assert_eq!(vc["credentialSubject"]["name"], "Alice");
    assert_eq!(vc["proof"]["proofPurpose"], "assertionMethod");
    assert!(verify_document(&vc, &issuer_key).unwrap());
}

#[tokio::test]
async fn test_issue_accepts_bare_method_did() {
    let state = issuer_state();
    let issuer_key = state.builder.public_key();
    let app = vcx_api::issuer_app(state);

    let response = app
        .oneshot(post_json("/issue", &json!({"subjectId": "did:holder"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let vc = body_json(response).await;
    assert_eq!(vc["credentialSubject"]["id"], "did:holder");
    assert!(verify_document(&vc, &issuer_key).unwrap());
}

#[tokio::test]
async fn test_issue_rejects_missing_subject() {
    let app = vcx_api::issuer_app(issuer_state());
    let response = app.oneshot(post_json("/issue", &json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_issue_rejects_invalid_did() {
    let app = vcx_api::issuer_app(issuer_state());
    let response = app
        .oneshot(post_json("/issue", &json!({"subjectId": "not a did"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_issuer_public_key_is_spki_base64() {
    let state = issuer_state();
    let expected = state.builder.public_key();
    let app = vcx_api::issuer_app(state);

    let response = app.oneshot(get("/public-key")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let key = Ed25519PublicKey::from_spki_base64(body["publicKeyBase64"].as_str().unwrap()).unwrap();
    assert_eq!(key, expected);
}

// -- Holder -------------------------------------------------------------------

#[tokio::test]
async fn test_present_with_empty_wallet_is_404() {
    let app = vcx_api::holder_app(holder_state());
    let response = app.oneshot(get("/present")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "No credentials to present.");
}

#[tokio::test]
async fn test_store_single_credential_then_present() {
    let state = holder_state();
    let holder_key = state.builder.public_key();
    let app = vcx_api::holder_app(state.clone());

    let credential = json!({"id": "urn:uuid:1", "credentialSubject": {"name": "Alice"}});
    let response = app.clone().oneshot(post_json("/store", &credential)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "Credentials stored");

    let response = app.oneshot(get("/present")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let vp = body_json(response).await;
    assert_eq!(vp["type"], json!(["VerifiablePresentation"]));
    assert_eq!(vp["holder"], "did:web:localhost:3002");
    assert_eq!(vp["verifiableCredential"], json!([credential]));
    assert_eq!(vp["proof"]["proofPurpose"], "authentication");
    assert!(verify_document(&vp, &holder_key).unwrap());
}

#[tokio::test]
async fn test_store_replaces_previous_wallet() {
    let state = holder_state();
    let app = vcx_api::holder_app(state.clone());

    let first = json!([{"id": "urn:1"}, {"id": "urn:2"}]);
    let response = app.clone().oneshot(post_json("/store", &first)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.credentials().len(), 2);

    let second = json!([{"id": "urn:3"}]);
    app.oneshot(post_json("/store", &second)).await.unwrap();
    assert_eq!(state.credentials(), vec![json!({"id": "urn:3"})]);
}

#[tokio::test]
async fn test_store_rejects_non_object_body() {
    let state = holder_state();
    let app = vcx_api::holder_app(state.clone());

    let response = app.oneshot(post_json("/store", &json!([1, 2]))).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(state.credentials().is_empty());
}

#[tokio::test]
async fn test_holder_public_key() {
    let state = holder_state();
    let expected = state.builder.public_key().to_spki_base64().unwrap();
    let app = vcx_api::holder_app(state);

    let response = app.oneshot(get("/public-key")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["publicKeyBase64"], expected);
}

// -- Verifier -----------------------------------------------------------------

#[tokio::test]
async fn test_verify_with_unreachable_holder_is_network_failure() {
    // Port 9 (discard) is not served in test environments.
    let config = ClientConfig::new("http://127.0.0.1:9", "http://127.0.0.1:9").unwrap();
    let app = vcx_api::verifier_app(VerifierState::new(ExchangeClient::new(config).unwrap()));

    let response = app.oneshot(get("/verify")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NETWORK_FAILURE");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("fetch_presentation"));
}
