// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order session extraction for the server.
//!
//! Routes under `/orders/{order_id}` resolve their order through the
//! [`OrderSession`] extractor, which rejects malformed ids and orders that
//! do not exist before any handler runs.

use axum::{
    Json,
    extract::{FromRequestParts, Path},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use tracing::{debug, error, warn};
use vr_config_api::WizardSession;
use vr_config_persistence::OrderRecord;

use crate::{AppState, ErrorResponse};

/// Extractor for the order named in the request path.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     OrderSession(session): OrderSession,
/// ) -> Result<Json<Response>, HttpError> {
///     // session: WizardSession
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Errors
///
/// Returns HTTP 400 if the order id is malformed and HTTP 404 if the
/// order does not exist.
pub struct OrderSession(pub WizardSession);

impl FromRequestParts<AppState> for OrderSession {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(params): Path<HashMap<String, String>> =
            Path::from_request_parts(parts, state)
                .await
                .map_err(|e| SessionError::InvalidOrderId(e.to_string()))?;

        let raw_id: &String = params.get("order_id").ok_or_else(|| {
            warn!("Route has no order_id parameter");
            SessionError::InvalidOrderId(String::from("missing order id"))
        })?;

        let session: WizardSession = WizardSession::parse(raw_id).map_err(|e| {
            debug!(order_id = %raw_id, "Malformed order id");
            SessionError::InvalidOrderId(e.to_string())
        })?;

        let mut persistence = state.persistence.lock().await;
        let record: Option<OrderRecord> =
            persistence.get_order(session.order_id()).map_err(|e| {
                error!(error = %e, "Failed to look up order");
                SessionError::Internal(e.to_string())
            })?;
        drop(persistence);

        if record.is_none() {
            debug!(order_id = %raw_id, "Order not found");
            return Err(SessionError::OrderNotFound(raw_id.clone()));
        }

        Ok(Self(session))
    }
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// The order id in the path is malformed.
    InvalidOrderId(String),
    /// No order has this id.
    OrderNotFound(String),
    /// The order could not be looked up.
    Internal(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let (status, message): (StatusCode, String) = match self {
            Self::InvalidOrderId(reason) => (StatusCode::BAD_REQUEST, reason),
            Self::OrderNotFound(order_id) => (
                StatusCode::NOT_FOUND,
                format!("Order not found: Order '{order_id}' does not exist"),
            ),
            Self::Internal(reason) => (StatusCode::INTERNAL_SERVER_ERROR, reason),
        };

        (
            status,
            Json(ErrorResponse {
                error: true,
                message,
            }),
        )
            .into_response()
    }
}
