// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    routing::post,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tower::ServiceExt;
use vr_config_api::{
    DeviceQuantity, IntakeClient, NavigateRequest, OrderView, ReplaceOptionsRequest,
    SaveUserDetailsRequest, SelectEnvironmentRequest, SelectGamesRequest, SetCustom3DRequest,
    SetDevicesRequest,
};
use vr_config_persistence::Persistence;

use crate::AppState;
use crate::live::LiveEventBroadcaster;

pub const QUEST_3S: &str = "Meta Quest 3s standard device package";

/// Helper to create test app state with in-memory persistence and no intake.
pub fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        live: Arc::new(LiveEventBroadcaster::new()),
        intake: None,
    }
}

/// Helper to create test app state that delivers to `url` without retry delays.
pub fn create_test_app_state_with_intake(url: &str) -> AppState {
    let client: IntakeClient = IntakeClient::new(url, Duration::from_secs(5))
        .unwrap()
        .with_retry_delays(vec![Duration::ZERO; 3]);
    AppState {
        intake: Some(Arc::new(client)),
        ..create_test_app_state()
    }
}

/// Starts a local intake endpoint answering every request with `status`.
///
/// Returns the endpoint URL and a counter of received requests.
pub async fn spawn_intake(status: StatusCode) -> (String, Arc<AtomicUsize>) {
    let attempts: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
    let counter: Arc<AtomicUsize> = Arc::clone(&attempts);
    let app: Router = Router::new().route(
        "/intake",
        post(move || {
            let counter: Arc<AtomicUsize> = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                status
            }
        }),
    );
    let listener: tokio::net::TcpListener =
        tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: std::net::SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/intake"), attempts)
}

pub async fn send_json(app: &Router, method: &str, uri: &str, body: &impl Serialize) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn send_empty(app: &Router, method: &str, uri: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

/// Creates an order through the API and returns its id.
pub async fn create_order(app: &Router) -> String {
    let response: Response = send_empty(app, "POST", "/orders").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let view: OrderView = read_json(response).await;
    view.order_id.to_string()
}

pub fn create_test_user_request() -> SaveUserDetailsRequest {
    SaveUserDetailsRequest {
        name: String::from("Mary Jackson"),
        company: String::from("Wind Tunnel Works"),
        email: String::from("mary@windtunnel.example"),
    }
}

pub async fn navigate_next(app: &Router, order_id: &str) -> Response {
    send_json(
        app,
        "POST",
        &format!("/orders/{order_id}/navigate"),
        &NavigateRequest::Next { focused_game: None },
    )
    .await
}

async fn put_ok(app: &Router, uri: &str, body: &impl Serialize) {
    let response: Response = send_json(app, "PUT", uri, body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Walks an order through every step to review.
///
/// Memory in Modern Office with one Quest 3s for two days: a Bronze order
/// totalling 3559.
pub async fn advance_to_review(app: &Router, order_id: &str) {
    put_ok(
        app,
        &format!("/orders/{order_id}/user"),
        &create_test_user_request(),
    )
    .await;
    assert_eq!(navigate_next(app, order_id).await.status(), StatusCode::OK);

    put_ok(
        app,
        &format!("/orders/{order_id}/games"),
        &SelectGamesRequest {
            games: vec![String::from("Memory")],
            multi_game: false,
        },
    )
    .await;
    assert_eq!(navigate_next(app, order_id).await.status(), StatusCode::OK);

    put_ok(
        app,
        &format!("/orders/{order_id}/environments"),
        &SelectEnvironmentRequest {
            game: String::from("Memory"),
            environment: String::from("Modern Office"),
        },
    )
    .await;
    assert_eq!(navigate_next(app, order_id).await.status(), StatusCode::OK);

    put_ok(
        app,
        &format!("/orders/{order_id}/devices"),
        &SetDevicesRequest {
            devices: vec![DeviceQuantity {
                device: QUEST_3S.to_string(),
                quantity: 1,
            }],
            event_days: 2,
        },
    )
    .await;
    assert_eq!(navigate_next(app, order_id).await.status(), StatusCode::OK);

    put_ok(
        app,
        &format!("/orders/{order_id}/custom-3d"),
        &SetCustom3DRequest {
            wanted: false,
            count: 0,
        },
    )
    .await;
    assert_eq!(navigate_next(app, order_id).await.status(), StatusCode::OK);

    put_ok(
        app,
        &format!("/orders/{order_id}/options"),
        &ReplaceOptionsRequest {
            options: Vec::new(),
        },
    )
    .await;
    assert_eq!(navigate_next(app, order_id).await.status(), StatusCode::OK);
}
