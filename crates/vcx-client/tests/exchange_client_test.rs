//! Contract tests for the issuer and holder clients.
//!
//! ## Endpoints Tested
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | POST   | `/issue` | `request_credential_*` |
//! | GET    | `/public-key` | `*_public_key_*` |
//! | GET    | `/present` | `presentation_*` |
//! | POST   | `/store` | `store_*` |

use std::time::Duration;

use vcx_client::{ClientConfig, ClientError, ExchangeClient};
use vcx_core::Did;
use vcx_vc::{CredentialSource, VerificationAggregator, VerificationError, VerificationStage};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(issuer: &MockServer, holder: &MockServer) -> ExchangeClient {
    let config = ClientConfig {
        issuer_url: issuer.uri().parse().unwrap(),
        holder_url: holder.uri().parse().unwrap(),
        timeout: Duration::from_secs(5),
        max_retries: 0,
    };
    ExchangeClient::new(config).unwrap()
}

// ── POST /issue ─────────────────────────────────────────────────────

#[tokio::test]
async fn request_credential_sends_subject_and_returns_raw_json() {
    let issuer = MockServer::start().await;
    let holder = MockServer::start().await;

    let vc = serde_json::json!({
        "id": "urn:uuid:1",
        "credentialSubject": {"id": "did:web:localhost:3002", "extra": {"nested": [1, 2]}},
        "proof": {"proofValue": "abc"}
    });
    Mock::given(method("POST"))
        .and(path("/issue"))
        .and(body_json(serde_json::json!({"subjectId": "did:web:localhost:3002"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(vc.clone()))
        .expect(1)
        .mount(&issuer)
        .await;

    let client = client_for(&issuer, &holder);
    let got = client
        .issuer()
        .request_credential(&Did::web_localhost(3002))
        .await
        .unwrap();
    assert_eq!(got, vc);
}

#[tokio::test]
async fn request_credential_handles_api_error() {
    let issuer = MockServer::start().await;
    let holder = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/issue"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&issuer)
        .await;

    let client = client_for(&issuer, &holder);
    let err = client
        .issuer()
        .request_credential(&Did::web_localhost(3002))
        .await
        .unwrap_err();
    match err {
        ClientError::ApiError { endpoint, status, body } => {
            assert_eq!(endpoint, "POST issuer /issue");
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

// ── GET /public-key ─────────────────────────────────────────────────

#[tokio::test]
async fn issuer_public_key_unwraps_field() {
    let issuer = MockServer::start().await;
    let holder = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"publicKeyBase64": "MCowBQ=="})),
        )
        .mount(&issuer)
        .await;

    let client = client_for(&issuer, &holder);
    assert_eq!(client.issuer().public_key().await.unwrap(), "MCowBQ==");
}

#[tokio::test]
async fn holder_public_key_rejects_wrong_shape() {
    let issuer = MockServer::start().await;
    let holder = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"key": "x"})))
        .mount(&holder)
        .await;

    let client = client_for(&issuer, &holder);
    let err = client.holder().public_key().await.unwrap_err();
    assert!(matches!(err, ClientError::Deserialization { .. }));
    assert_eq!(err.endpoint(), Some("GET holder /public-key"));
}

// ── GET /present ────────────────────────────────────────────────────

#[tokio::test]
async fn presentation_404_is_api_error() {
    let issuer = MockServer::start().await;
    let holder = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/present"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"error": {"code": "NOT_FOUND", "message": "No credentials to present."}})),
        )
        .mount(&holder)
        .await;

    let client = client_for(&issuer, &holder);
    let err = client.holder().presentation().await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn presentation_with_invalid_json_is_deserialization_error() {
    let issuer = MockServer::start().await;
    let holder = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/present"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&holder)
        .await;

    let client = client_for(&issuer, &holder);
    assert!(matches!(
        client.holder().presentation().await,
        Err(ClientError::Deserialization { .. })
    ));
}

// ── POST /store ─────────────────────────────────────────────────────

#[tokio::test]
async fn store_posts_body_verbatim() {
    let issuer = MockServer::start().await;
    let holder = MockServer::start().await;

    let creds = serde_json::json!([{"id": "urn:uuid:1"}, {"id": "urn:uuid:2"}]);
    Mock::given(method("POST"))
        .and(path("/store"))
        .and(body_json(creds.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_string("Credentials stored"))
        .expect(1)
        .mount(&holder)
        .await;

    let client = client_for(&issuer, &holder);
    client.holder().store(&creds).await.unwrap();
}

// ── CredentialSource / aggregator over HTTP ─────────────────────────

#[tokio::test]
async fn unreachable_holder_is_network_failure() {
    let issuer = MockServer::start().await;
    let config = ClientConfig {
        issuer_url: issuer.uri().parse().unwrap(),
        holder_url: "http://127.0.0.1:1".parse().unwrap(),
        timeout: Duration::from_secs(2),
        max_retries: 0,
    };
    let client = ExchangeClient::new(config).unwrap();

    let fetch_err = client.fetch_presentation().await.unwrap_err();
    assert_eq!(fetch_err.endpoint, "GET holder /present");

    let err = VerificationAggregator::new(client).run().await.unwrap_err();
    assert!(matches!(
        err,
        VerificationError::NetworkFailure { stage: VerificationStage::FetchPresentation, .. }
    ));
}

#[tokio::test]
async fn slow_holder_times_out_as_network_failure() {
    let issuer = MockServer::start().await;
    let holder = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/present"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"verifiableCredential": []}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&holder)
        .await;

    let config = ClientConfig {
        issuer_url: issuer.uri().parse().unwrap(),
        holder_url: holder.uri().parse().unwrap(),
        timeout: Duration::from_millis(100),
        max_retries: 0,
    };
    let client = ExchangeClient::new(config).unwrap();

    let err = VerificationAggregator::new(client).run().await.unwrap_err();
    match err {
        VerificationError::NetworkFailure { stage, source } => {
            assert_eq!(stage, VerificationStage::FetchPresentation);
            assert_eq!(source.endpoint, "GET holder /present");
        }
        other => panic!("expected a network failure, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_holder_key_is_key_format_error() {
    let issuer = MockServer::start().await;
    let holder = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/present"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"proof": {}})))
        .mount(&holder)
        .await;
    Mock::given(method("GET"))
        .and(path("/public-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"publicKeyBase64": "bm9wZQ=="})),
        )
        .mount(&holder)
        .await;

    let client = client_for(&issuer, &holder);
    let err = VerificationAggregator::new(client).run().await.unwrap_err();
    assert!(matches!(err, VerificationError::KeyFormat { party: "holder", .. }));
}
