//! # Cross-Crate Flows
//!
//! One prover shared by the handle store, the JSON-RPC service and the HTTP
//! app, the way the binaries wire it. Proofs produced on one surface must
//! verify on the others, and concurrent callers on different surfaces must
//! never see each other's inputs.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use zkrpc_api::state::{AppConfig, AppState};
use zkrpc_core::CircuitInputs;
use zkrpc_prover::transparent::{PROOF_LEN, PROOF_MAGIC};
use zkrpc_prover::{Prover, TransparentBackend};
use zkrpc_rpc::protocol::Method;
use zkrpc_rpc::ZkService;
use zkrpc_store::{HandleStore, ProofRegistry};

struct Stack {
    prover: Arc<Prover<TransparentBackend>>,
    store: Arc<HandleStore<TransparentBackend>>,
    rpc: ZkService,
    http: axum::Router,
}

fn stack_with(backend: TransparentBackend) -> Stack {
    let prover = Arc::new(Prover::new(backend));
    let store = Arc::new(HandleStore::new(Arc::clone(&prover)));
    let rpc = ZkService::new(store.clone(), prover.clone());
    let http = zkrpc_api::app(AppState::with_prover(prover.clone(), AppConfig::default()));
    Stack {
        prover,
        store,
        rpc,
        http,
    }
}

fn stack() -> Stack {
    stack_with(TransparentBackend::new())
}

async fn http_post(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Inputs embedded in a transparent proof.
fn proven_inputs(proof: &[u8]) -> CircuitInputs {
    assert_eq!(proof.len(), PROOF_LEN);
    assert_eq!(&proof[..4], PROOF_MAGIC);
    let word = |at: usize| u64::from_le_bytes(proof[at..at + 8].try_into().unwrap());
    CircuitInputs::new(word(4), word(12), word(20))
}

#[tokio::test]
async fn http_proof_verifies_over_rpc() {
    let stack = stack();
    let (status, generated) =
        http_post(&stack.http, "/generate", json!({"a": 1, "b": 2, "const": 3})).await;
    assert_eq!(status, StatusCode::OK);

    let verified = stack
        .rpc
        .call(Method::VerifyJob, json!({"proof": generated["proof_base64"]}))
        .unwrap();
    assert_eq!(verified["verified"], true);
}

#[tokio::test]
async fn rpc_job_proof_verifies_over_http() {
    let stack = stack();
    let job = stack
        .rpc
        .call(Method::SubmitJob, json!({"a": 232312, "b": 13131, "const_val": 1424124}))
        .unwrap();

    let (status, verified) =
        http_post(&stack.http, "/verify", json!({"proof_base64": job["proof"]})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verified["valid"], true);
}

#[tokio::test]
async fn surfaces_agree_on_proof_bytes() {
    let stack = stack();
    let (_, generated) =
        http_post(&stack.http, "/generate", json!({"a": 7, "b": 8, "const": 9})).await;
    let job = stack
        .rpc
        .call(Method::SubmitJob, json!({"a": 7, "b": 8, "const_val": 9}))
        .unwrap();
    assert_eq!(generated["proof_base64"], job["proof"]);
}

#[tokio::test]
async fn stateless_surfaces_leave_the_registry_alone() {
    let stack = stack();
    http_post(&stack.http, "/generate", json!({"a": 1, "b": 1, "const": 1})).await;
    stack
        .rpc
        .call(Method::SubmitJob, json!({"a": 1, "b": 1, "const_val": 1}))
        .unwrap();
    let id = stack.store.generate(CircuitInputs::new(2, 2, 2)).unwrap();
    assert_eq!(id.as_str(), "p-1");
    assert_eq!(stack.store.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_callers_on_different_surfaces_keep_their_inputs() {
    const ROUNDS: u64 = 8;
    let stack = stack_with(TransparentBackend::new().with_prove_delay(Duration::from_millis(1)));

    let http_tasks: Vec<_> = (0..ROUNDS)
        .map(|i| {
            let app = stack.http.clone();
            tokio::spawn(async move {
                let (status, body) =
                    http_post(&app, "/generate", json!({"a": i, "b": 100 + i, "const": 7})).await;
                assert_eq!(status, StatusCode::OK);
                let proof = STANDARD
                    .decode(body["proof_base64"].as_str().unwrap())
                    .unwrap();
                assert_eq!(proven_inputs(&proof), CircuitInputs::new(i, 100 + i, 7));
            })
        })
        .collect();

    let registry_tasks: Vec<_> = (0..ROUNDS)
        .map(|i| {
            let store = Arc::clone(&stack.store);
            tokio::task::spawn_blocking(move || {
                let id = store.generate(CircuitInputs::new(1000 + i, 3, 4)).unwrap();
                assert_eq!(store.verify(&id), Ok(true));
                store.free(&id).unwrap();
            })
        })
        .collect();

    for task in http_tasks {
        task.await.unwrap();
    }
    for task in registry_tasks {
        task.await.unwrap();
    }

    let backend = stack.prover.backend();
    assert_eq!(backend.produced(), ROUNDS);
    assert_eq!(backend.released(), ROUNDS);
    assert!(stack.store.is_empty());
}

#[tokio::test]
async fn rpc_lifecycle_over_shared_prover() {
    let stack = stack();
    let generated = stack
        .rpc
        .call(Method::Generate, json!([{"a": 232312, "b": 13131, "const": 1424124}]))
        .unwrap();
    let id = generated["proof_id"].clone();
    assert_eq!(id, "p-1");

    let verified = stack.rpc.call(Method::Verify, json!([{"proof_id": id}])).unwrap();
    assert_eq!(verified["ok"], true);
    stack.rpc.call(Method::Free, json!([{"proof_id": id}])).unwrap();

    let err = stack
        .rpc
        .call(Method::Verify, json!([{"proof_id": id}]))
        .unwrap_err();
    assert_eq!(err.code(), "UNKNOWN_IDENTITY");
    assert_eq!(stack.prover.backend().live_artifacts(), 0);
}
