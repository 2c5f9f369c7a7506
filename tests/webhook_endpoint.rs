mod support;

use axum::body::{Bytes, to_bytes};
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use cdw_planner::api::handle_webhook;
use cdw_planner::planner::PlanEvent;
use cdw_planner::webhook::OperationKind;
use cdw_planner::{AppState, GitHubConfig, PlannerConfig, SharedState};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;
use support::{FakeReader, MULTIPLE_COMMITS, MemorySink, SINGLE_COMMIT};

fn state_with(secret: Option<&str>) -> (SharedState, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::default());
    let config = PlannerConfig {
        log_dir: None,
        github: GitHubConfig {
            owner: "rstropek".to_string(),
            repo: "CDWPlanner".to_string(),
            branch: "master".to_string(),
            raw_base_url: None,
            with_webhook_secret: secret.map(|_| true),
            webhook_secret: secret.map(String::from),
        },
    };
    let state = Arc::new(AppState {
        config,
        planner: PlanEvent::new(Arc::new(FakeReader::default()), "master"),
        sink: sink.clone(),
    });
    (state, sink)
}

fn push_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("X-GitHub-Event", HeaderValue::from_static("push"));
    headers
}

fn sign(secret: &str, body: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(body);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}

#[tokio::test]
async fn push_is_accepted_with_empty_body() {
    let (state, sink) = state_with(None);

    let response = handle_webhook(State(state), push_headers(), Bytes::from(SINGLE_COMMIT)).await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(body.is_empty());

    let operations = sink.taken();
    assert_eq!(operations.len(), 1);
    assert_eq!(operations[0].operation, OperationKind::Modified);
}

#[tokio::test]
async fn delivery_without_event_header_is_processed() {
    let (state, sink) = state_with(None);

    let response =
        handle_webhook(State(state), HeaderMap::new(), Bytes::from(MULTIPLE_COMMITS)).await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(sink.taken().len(), 2);
}

#[tokio::test]
async fn malformed_payload_is_a_client_error() {
    let (state, sink) = state_with(None);

    let response = handle_webhook(
        State(state),
        push_headers(),
        Bytes::from_static(br#"{ "ref": "refs/heads/master" }"#),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let message = String::from_utf8(body.to_vec()).unwrap();
    assert!(message.starts_with("Malformed webhook payload"));
    assert!(sink.taken().is_empty());
}

#[tokio::test]
async fn ping_event_is_ignored() {
    let (state, sink) = state_with(None);
    let mut headers = HeaderMap::new();
    headers.insert("X-GitHub-Event", HeaderValue::from_static("ping"));

    let response = handle_webhook(State(state), headers, Bytes::from(SINGLE_COMMIT)).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(sink.taken().is_empty());
}

#[tokio::test]
async fn signed_delivery_is_accepted() {
    let (state, sink) = state_with(Some("s3cret"));
    let mut headers = push_headers();
    headers.insert(
        "X-Hub-Signature-256",
        HeaderValue::from_str(&sign("s3cret", SINGLE_COMMIT.as_bytes())).unwrap(),
    );

    let response = handle_webhook(State(state), headers, Bytes::from(SINGLE_COMMIT)).await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(sink.taken().len(), 1);
}

#[tokio::test]
async fn bad_or_missing_signature_is_unauthorized() {
    let (state, sink) = state_with(Some("s3cret"));

    let response =
        handle_webhook(State(state.clone()), push_headers(), Bytes::from(SINGLE_COMMIT)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let mut headers = push_headers();
    headers.insert(
        "X-Hub-Signature-256",
        HeaderValue::from_str(&sign("wrong", SINGLE_COMMIT.as_bytes())).unwrap(),
    );
    let response = handle_webhook(State(state), headers, Bytes::from(SINGLE_COMMIT)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert!(sink.taken().is_empty());
}
