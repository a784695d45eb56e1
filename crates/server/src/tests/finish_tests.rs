// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{Router, http::StatusCode, response::Response};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::broadcast;
use vr_config_api::{FinishResponse, SelectGamesRequest};
use vr_config_domain::{BRONZE_BASE_PRICE, Tier};

use super::helpers::{
    advance_to_review, create_order, create_test_app_state, create_test_app_state_with_intake,
    read_json, send_empty, send_json, spawn_intake,
};
use crate::live::LiveEvent;
use crate::{AppState, build_router};

#[tokio::test]
async fn test_finish_without_intake_completes_order() {
    let app_state: AppState = create_test_app_state();
    let app: Router = build_router(app_state.clone());
    let order_id: String = create_order(&app).await;
    advance_to_review(&app, &order_id).await;
    let mut rx: broadcast::Receiver<LiveEvent> = app_state.live.subscribe();

    let response: Response = send_empty(&app, "POST", &format!("/orders/{order_id}/finish")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: FinishResponse = read_json(response).await;
    assert!(body.order.completed_at.is_some());
    assert_eq!(body.record.tier, Tier::Bronze);
    assert_eq!(body.record.total_price, BRONZE_BASE_PRICE + 60);
    assert!(!body.submission.attempted);
    assert!(!body.submission.delivered);
    assert!(matches!(
        rx.recv().await.unwrap(),
        LiveEvent::OrderSubmitted {
            delivered: false,
            ..
        }
    ));
}

#[tokio::test]
async fn test_finish_delivers_to_intake() {
    let (url, attempts): (String, Arc<AtomicUsize>) = spawn_intake(StatusCode::OK).await;
    let app_state: AppState = create_test_app_state_with_intake(&url);
    let app: Router = build_router(app_state.clone());
    let order_id: String = create_order(&app).await;
    advance_to_review(&app, &order_id).await;
    let mut rx: broadcast::Receiver<LiveEvent> = app_state.live.subscribe();

    let response: Response = send_empty(&app, "POST", &format!("/orders/{order_id}/finish")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: FinishResponse = read_json(response).await;
    assert!(body.submission.attempted);
    assert!(body.submission.delivered);
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert_eq!(
        rx.recv().await.unwrap(),
        LiveEvent::OrderSubmitted {
            order_id,
            total_price: BRONZE_BASE_PRICE + 60,
            delivered: true,
        }
    );
}

#[tokio::test]
async fn test_failed_delivery_still_completes_order() {
    let (url, attempts): (String, Arc<AtomicUsize>) =
        spawn_intake(StatusCode::SERVICE_UNAVAILABLE).await;
    let app_state: AppState = create_test_app_state_with_intake(&url);
    let app: Router = build_router(app_state.clone());
    let order_id: String = create_order(&app).await;
    advance_to_review(&app, &order_id).await;
    let mut rx: broadcast::Receiver<LiveEvent> = app_state.live.subscribe();

    let response: Response = send_empty(&app, "POST", &format!("/orders/{order_id}/finish")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: FinishResponse = read_json(response).await;
    assert!(body.submission.attempted);
    assert!(!body.submission.delivered);
    assert!(body.submission.error.is_some());
    assert_eq!(attempts.load(Ordering::SeqCst), 4);
    assert!(matches!(
        rx.recv().await.unwrap(),
        LiveEvent::SubmissionFailed { order_id: ref failed, .. } if *failed == order_id
    ));

    let again: Response = send_empty(&app, "POST", &format!("/orders/{order_id}/finish")).await;
    assert_eq!(again.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_finish_before_review_is_rejected() {
    let app: Router = build_router(create_test_app_state());
    let order_id: String = create_order(&app).await;

    let response: Response = send_empty(&app, "POST", &format!("/orders/{order_id}/finish")).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_completed_order_rejects_changes() {
    let app: Router = build_router(create_test_app_state());
    let order_id: String = create_order(&app).await;
    advance_to_review(&app, &order_id).await;
    send_empty(&app, "POST", &format!("/orders/{order_id}/finish")).await;

    let response: Response = send_json(
        &app,
        "PUT",
        &format!("/orders/{order_id}/games"),
        &SelectGamesRequest {
            games: vec![String::from("Wheel of fortune")],
            multi_game: false,
        },
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
