// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use time::macros::datetime;
use tokio::sync::Mutex;
use vr_config::OrderState;
use vr_config_domain::{OrderId, UserDetails};

use crate::{
    IntakeClient, SubmissionError, SubmissionOutcome, SubmissionRecord, deliver_submission,
};

/// A local intake endpoint that fails a fixed number of times, then accepts.
#[derive(Clone)]
struct StubIntake {
    failures_remaining: Arc<AtomicUsize>,
    attempts: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<serde_json::Value>>>,
}

async fn handle_intake(
    State(stub): State<StubIntake>,
    Json(body): Json<serde_json::Value>,
) -> StatusCode {
    stub.attempts.fetch_add(1, Ordering::SeqCst);
    stub.received.lock().await.push(body);
    let failing: bool = stub
        .failures_remaining
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok();
    if failing {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    }
}

async fn spawn_stub(failures: usize) -> (String, StubIntake) {
    let stub: StubIntake = StubIntake {
        failures_remaining: Arc::new(AtomicUsize::new(failures)),
        attempts: Arc::new(AtomicUsize::new(0)),
        received: Arc::new(Mutex::new(Vec::new())),
    };
    let app: Router = Router::new()
        .route("/intake", post(handle_intake))
        .with_state(stub.clone());
    let listener: tokio::net::TcpListener =
        tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: std::net::SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/intake"), stub)
}

fn create_test_client(url: &str) -> IntakeClient {
    IntakeClient::new(url, Duration::from_secs(5))
        .unwrap()
        .with_retry_delays(vec![Duration::ZERO; 3])
}

fn create_test_record() -> SubmissionRecord {
    let mut order: OrderState = OrderState::new(OrderId::new(), datetime!(2026-05-02 15:45:00 UTC));
    order.user = Some(UserDetails::new(
        "Dorothy Vaughan",
        "Langley Computing",
        "dorothy@langley.example",
    ));
    SubmissionRecord::from_order(&order, datetime!(2026-05-02 16:00:00 UTC)).unwrap()
}

#[tokio::test]
async fn test_submit_posts_record_and_summary() {
    let (url, stub) = spawn_stub(0).await;
    let client: IntakeClient = create_test_client(&url);
    let record: SubmissionRecord = create_test_record();

    client.submit(&record).await.unwrap();

    assert_eq!(stub.attempts.load(Ordering::SeqCst), 1);
    let received: tokio::sync::MutexGuard<'_, Vec<serde_json::Value>> = stub.received.lock().await;
    let body: &serde_json::Value = &received[0];
    assert_eq!(body["_replyto"], "dorothy@langley.example");
    assert_eq!(body["order_id"], record.order_id.to_string());
    assert_eq!(body["total_price"], 3499);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("Total Price: $3,499")
    );
    assert!(
        body["_subject"]
            .as_str()
            .unwrap()
            .contains(&record.order_id.to_string())
    );
}

#[tokio::test]
async fn test_submit_retries_until_accepted() {
    let (url, stub) = spawn_stub(2).await;
    let client: IntakeClient = create_test_client(&url);

    client.submit(&create_test_record()).await.unwrap();

    assert_eq!(stub.attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_submit_gives_up_after_all_retries() {
    let (url, stub) = spawn_stub(usize::MAX).await;
    let client: IntakeClient = create_test_client(&url);

    let result: Result<(), SubmissionError> = client.submit(&create_test_record()).await;

    assert!(matches!(result, Err(SubmissionError::HttpStatus(500))));
    assert_eq!(stub.attempts.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_deliver_without_client_is_skipped() {
    let outcome: SubmissionOutcome = deliver_submission(None, &create_test_record()).await;

    assert!(!outcome.attempted);
    assert!(!outcome.delivered);
    assert!(outcome.error.is_none());
}

#[tokio::test]
async fn test_deliver_reports_failure_without_panicking() {
    let (url, _stub) = spawn_stub(usize::MAX).await;
    let client: IntakeClient = create_test_client(&url);

    let outcome: SubmissionOutcome = deliver_submission(Some(&client), &create_test_record()).await;

    assert!(outcome.attempted);
    assert!(!outcome.delivered);
    assert_eq!(
        outcome.error.as_deref(),
        Some("Intake endpoint returned HTTP 500")
    );
}

#[test]
fn test_submission_error_display_http_status() {
    let err: SubmissionError = SubmissionError::HttpStatus(502);
    assert_eq!(err.to_string(), "Intake endpoint returned HTTP 502");
}
