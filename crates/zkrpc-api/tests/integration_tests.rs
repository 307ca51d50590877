//! # Integration Tests for zkrpc-api
//!
//! Health probes, the generate/verify round trip, malformed-input handling,
//! generation failure, metrics counters, and the OpenAPI document.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use zkrpc_api::middleware::metrics::ApiMetrics;
use zkrpc_api::state::{AppConfig, AppState};
use zkrpc_prover::{Prover, TransparentBackend};

fn test_app() -> axum::Router {
    zkrpc_api::app(AppState::new())
}

fn test_app_with_prover(prover: Arc<Prover<TransparentBackend>>) -> axum::Router {
    zkrpc_api::app(AppState::with_prover(prover, AppConfig::default()))
}

async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::http::Response<Body>) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/health/liveness")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/health/readiness")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

// -- Generate / Verify --------------------------------------------------------

#[tokio::test]
async fn test_generate_then_verify_round_trip() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post("/generate", r#"{"a":1,"b":2,"const":3}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let generated = body_json(response).await;
    let proof = generated["proof_base64"].as_str().unwrap().to_string();
    assert!(!proof.is_empty());
    assert!(generated["prover_ms"].as_f64().unwrap() >= 0.0);

    let response = app
        .oneshot(post("/verify", json!({"proof_base64": proof}).to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let verified = body_json(response).await;
    assert_eq!(verified["valid"], true);
    assert!(verified["verifier_ms"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn test_generate_is_deterministic_per_inputs() {
    let app = test_app();
    let mut proofs = Vec::new();
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(post("/generate", r#"{"a":232312,"b":13131,"const":1424124}"#))
            .await
            .unwrap();
        proofs.push(body_json(response).await["proof_base64"].clone());
    }
    assert_eq!(proofs[0], proofs[1]);
}

#[tokio::test]
async fn test_body_parsed_without_content_type() {
    let request = Request::builder()
        .method("POST")
        .uri("/generate")
        .body(Body::from(r#"{"a":1,"b":2,"const":3}"#))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_verify_rejects_invalid_base64() {
    let response = test_app()
        .oneshot(post("/verify", r#"{"proof_base64":"not-valid-base64"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "MALFORMED_REQUEST");
}

#[tokio::test]
async fn test_verify_reports_false_for_tampered_proof() {
    // Valid base64, not a valid proof.
    let response = test_app()
        .oneshot(post("/verify", r#"{"proof_base64":"AAAAAAAA"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["valid"], false);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    for (uri, body) in [
        ("/generate", "{not json"),
        ("/generate", r#"{"a":1,"b":2}"#),
        ("/generate", r#"{"a":-1,"b":2,"const":3}"#),
        ("/verify", r#"{"proof":"AAAA"}"#),
        ("/verify", ""),
    ] {
        let response = test_app().oneshot(post(uri, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri} {body}");
    }
}

#[tokio::test]
async fn test_generation_failure_is_server_error() {
    let prover = Arc::new(Prover::new(TransparentBackend::new()));
    prover.backend().set_fail_generation(true);

    let response = test_app_with_prover(prover)
        .oneshot(post("/generate", r#"{"a":1,"b":2,"const":3}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "GENERATION_FAILED");
}

#[tokio::test]
async fn test_http_path_issues_no_registry_artifacts() {
    let prover = Arc::new(Prover::new(TransparentBackend::new()));
    let response = test_app_with_prover(Arc::clone(&prover))
        .oneshot(post("/generate", r#"{"a":5,"b":6,"const":7}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(prover.backend().produced(), 0);
    assert_eq!(prover.backend().live_artifacts(), 0);
}

#[tokio::test]
async fn test_get_on_generate_is_method_not_allowed() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/generate")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// -- Metrics ------------------------------------------------------------------

#[tokio::test]
async fn test_metrics_count_requests_and_proofs() {
    let metrics = ApiMetrics::new();
    let app = zkrpc_api::app_with_metrics(AppState::new(), metrics.clone());

    let response = app
        .clone()
        .oneshot(post("/generate", r#"{"a":1,"b":1,"const":1}"#))
        .await
        .unwrap();
    let proof = body_json(response).await["proof_base64"].clone();
    app.clone()
        .oneshot(post("/verify", json!({"proof_base64": proof}).to_string()))
        .await
        .unwrap();
    app.clone()
        .oneshot(post("/verify", "garbage"))
        .await
        .unwrap();

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.requests, 3);
    assert_eq!(snapshot.errors, 1);
    assert_eq!(snapshot.proofs_generated, 1);
    assert_eq!(snapshot.proofs_verified, 1);

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["proofs_generated"], 1);
}

// -- OpenAPI ------------------------------------------------------------------

#[tokio::test]
async fn test_openapi_document_served() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;
    assert!(doc["paths"]["/generate"]["post"].is_object());
    assert!(doc["paths"]["/verify"]["post"].is_object());
}
