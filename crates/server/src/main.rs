// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod live;
mod session;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use vr_config::{Command, OrderSnapshot};
use vr_config_api::{
    ApiError, CatalogResponse, CommandResponse, FinishResponse, FinishedOrder, IntakeClient,
    NavigateRequest, OrderView, QuoteResponse, ReplaceOptionsRequest, SaveUserDetailsRequest,
    SelectEnvironmentRequest, SelectGamesRequest, SetCustom3DRequest, SetDevicesRequest,
    StepStatusResponse, SubmissionOutcome, ToggleOptionRequest, WizardSession, deliver_submission,
    execute_command, finish_order, list_catalog, quote, resume_order, start_order, step_status,
};
use vr_config_domain::{DomainError, WizardStep};
use vr_config_persistence::Persistence;

use crate::live::{LiveEvent, LiveEventBroadcaster, live_events_handler};
use crate::session::OrderSession;

/// VR Config Server - HTTP server for the VR event configurator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// URL finished orders are posted to. If not provided, orders are
    /// completed without being delivered anywhere.
    #[arg(long)]
    intake_url: Option<String>,

    /// Timeout in seconds for each request to the intake endpoint
    #[arg(long, default_value_t = 10)]
    intake_timeout_secs: u64,
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a Mutex: every command holds it for
/// the whole load, apply, save, and reprice sequence so that concurrent
/// edits to one order are serialized.
#[derive(Clone)]
struct AppState {
    /// The order store.
    persistence: Arc<Mutex<Persistence>>,
    /// Broadcaster for live order events.
    live: Arc<LiveEventBroadcaster>,
    /// Client for the intake endpoint, when one is configured.
    intake: Option<Arc<IntakeClient>>,
}

/// Query parameters for a step status lookup.
#[derive(Debug, Deserialize)]
struct StepStatusQuery {
    /// On step 3 with two games, the focused game tab.
    focused_game: Option<String>,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Always true for errors.
    error: bool,
    /// The error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::DomainRuleViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

impl From<DomainError> for HttpError {
    fn from(err: DomainError) -> Self {
        Self::from(vr_config_api::translate_domain_error(err))
    }
}

/// Runs one command against an order and announces the result.
///
/// Selection commands always announce the recomputed pricing so that open
/// price summaries re-render; any command that moved the wizard announces
/// the new step. Events are sent while the store lock is held, so they
/// reach subscribers in the order the commands were applied.
async fn run_command(
    app_state: &AppState,
    session: &WizardSession,
    command: Command,
) -> Result<CommandResponse, HttpError> {
    let reprices: bool = !matches!(
        command,
        Command::Advance { .. } | Command::Retreat | Command::JumpToStep { .. }
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CommandResponse = execute_command(&mut persistence, session, command)?;

    let order_id: String = response.order.order_id.to_string();
    if reprices {
        app_state.live.broadcast(&LiveEvent::PricingUpdated {
            order_id: order_id.clone(),
            revision: response.order.revision,
            tier: response.order.pricing.tier,
            base_price: response.order.pricing.base_price,
            device_price: response.order.pricing.device_price,
            total_price: response.order.pricing.total_price,
            tier_change: response.tier_change,
        });
    }
    if response.step_changed {
        app_state.live.broadcast(&LiveEvent::StepChanged {
            order_id,
            revision: response.order.revision,
            step: response.order.step.value(),
            title: response.order.step_title.clone(),
        });
    }
    drop(persistence);

    Ok(response)
}

/// Handler for POST `/orders` endpoint.
///
/// Starts a new order on step 1 at Bronze.
async fn handle_create_order(
    AxumState(app_state): AxumState<AppState>,
) -> Result<(StatusCode, Json<OrderView>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let view: OrderView = start_order(&mut persistence)?;
    drop(persistence);

    info!(order_id = %view.order_id, "Started order");
    Ok((StatusCode::CREATED, Json(view)))
}

/// Handler for GET `/orders/{order_id}` endpoint.
async fn handle_get_order(
    AxumState(app_state): AxumState<AppState>,
    OrderSession(session): OrderSession,
) -> Result<Json<OrderView>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let view: OrderView = resume_order(&mut persistence, &session)?;
    drop(persistence);

    Ok(Json(view))
}

/// Handler for GET `/orders/{order_id}/steps/{step}` endpoint.
async fn handle_get_step_status(
    AxumState(app_state): AxumState<AppState>,
    OrderSession(session): OrderSession,
    Path((_order_id, step)): Path<(String, u8)>,
    Query(query): Query<StepStatusQuery>,
) -> Result<Json<StepStatusResponse>, HttpError> {
    let step: WizardStep = WizardStep::new(step)?;

    let mut persistence = app_state.persistence.lock().await;
    let status: StepStatusResponse = step_status(
        &mut persistence,
        &session,
        step,
        query.focused_game.as_deref(),
    )?;
    drop(persistence);

    Ok(Json(status))
}

/// Handler for PUT `/orders/{order_id}/user` endpoint.
async fn handle_save_user_details(
    AxumState(app_state): AxumState<AppState>,
    OrderSession(session): OrderSession,
    Json(req): Json<SaveUserDetailsRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    let response: CommandResponse = run_command(&app_state, &session, req.into()).await?;
    Ok(Json(response))
}

/// Handler for PUT `/orders/{order_id}/games` endpoint.
async fn handle_select_games(
    AxumState(app_state): AxumState<AppState>,
    OrderSession(session): OrderSession,
    Json(req): Json<SelectGamesRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!(order_id = %session.order_id(), games = ?req.games, "Selecting games");
    let response: CommandResponse = run_command(&app_state, &session, req.into()).await?;
    Ok(Json(response))
}

/// Handler for PUT `/orders/{order_id}/environments` endpoint.
async fn handle_select_environment(
    AxumState(app_state): AxumState<AppState>,
    OrderSession(session): OrderSession,
    Json(req): Json<SelectEnvironmentRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    let response: CommandResponse = run_command(&app_state, &session, req.into()).await?;
    Ok(Json(response))
}

/// Handler for PUT `/orders/{order_id}/devices` endpoint.
async fn handle_set_devices(
    AxumState(app_state): AxumState<AppState>,
    OrderSession(session): OrderSession,
    Json(req): Json<SetDevicesRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    let response: CommandResponse = run_command(&app_state, &session, req.into()).await?;
    Ok(Json(response))
}

/// Handler for PUT `/orders/{order_id}/custom-3d` endpoint.
async fn handle_set_custom_3d(
    AxumState(app_state): AxumState<AppState>,
    OrderSession(session): OrderSession,
    Json(req): Json<SetCustom3DRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    let response: CommandResponse = run_command(&app_state, &session, req.into()).await?;
    Ok(Json(response))
}

/// Handler for PUT `/orders/{order_id}/options` endpoint.
async fn handle_replace_options(
    AxumState(app_state): AxumState<AppState>,
    OrderSession(session): OrderSession,
    Json(req): Json<ReplaceOptionsRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    let response: CommandResponse = run_command(&app_state, &session, req.into()).await?;
    Ok(Json(response))
}

/// Handler for POST `/orders/{order_id}/options/toggle` endpoint.
async fn handle_toggle_option(
    AxumState(app_state): AxumState<AppState>,
    OrderSession(session): OrderSession,
    Json(req): Json<ToggleOptionRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    let response: CommandResponse = run_command(&app_state, &session, req.into()).await?;
    Ok(Json(response))
}

/// Handler for POST `/orders/{order_id}/navigate` endpoint.
async fn handle_navigate(
    AxumState(app_state): AxumState<AppState>,
    OrderSession(session): OrderSession,
    Json(req): Json<NavigateRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    let command: Command = req.into_command()?;
    let response: CommandResponse = run_command(&app_state, &session, command).await?;
    Ok(Json(response))
}

/// Handler for POST `/orders/{order_id}/finish` endpoint.
///
/// Completes the order under the store lock, then delivers the submission
/// record with the lock released. Delivery failures do not undo completion:
/// they are reported in the response and announced to live clients.
async fn handle_finish_order(
    AxumState(app_state): AxumState<AppState>,
    OrderSession(session): OrderSession,
) -> Result<Json<FinishResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let finished: FinishedOrder = finish_order(&mut persistence, &session)?;
    drop(persistence);

    let submission: SubmissionOutcome =
        deliver_submission(app_state.intake.as_deref(), &finished.record).await;

    let order_id: String = finished.record.order_id.to_string();
    if submission.attempted && !submission.delivered {
        warn!(order_id = %order_id, error = ?submission.error, "Order completed but not delivered");
        app_state.live.broadcast(&LiveEvent::SubmissionFailed {
            order_id,
            error: submission.error.clone().unwrap_or_default(),
        });
    } else {
        app_state.live.broadcast(&LiveEvent::OrderSubmitted {
            order_id,
            total_price: finished.record.total_price,
            delivered: submission.delivered,
        });
    }

    Ok(Json(FinishResponse {
        order: finished.order,
        record: finished.record,
        submission,
    }))
}

/// Handler for GET `/catalog` endpoint.
#[allow(clippy::unused_async)]
async fn handle_get_catalog() -> Json<CatalogResponse> {
    Json(list_catalog())
}

/// Handler for POST `/pricing/quote` endpoint.
///
/// Prices an arbitrary selection without creating an order.
#[allow(clippy::unused_async)]
async fn handle_quote(Json(snapshot): Json<OrderSnapshot>) -> Json<QuoteResponse> {
    Json(quote(&snapshot))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/orders", post(handle_create_order))
        .route("/orders/{order_id}", get(handle_get_order))
        .route(
            "/orders/{order_id}/steps/{step}",
            get(handle_get_step_status),
        )
        .route("/orders/{order_id}/user", put(handle_save_user_details))
        .route("/orders/{order_id}/games", put(handle_select_games))
        .route(
            "/orders/{order_id}/environments",
            put(handle_select_environment),
        )
        .route("/orders/{order_id}/devices", put(handle_set_devices))
        .route("/orders/{order_id}/custom-3d", put(handle_set_custom_3d))
        .route("/orders/{order_id}/options", put(handle_replace_options))
        .route(
            "/orders/{order_id}/options/toggle",
            post(handle_toggle_option),
        )
        .route("/orders/{order_id}/navigate", post(handle_navigate))
        .route("/orders/{order_id}/finish", post(handle_finish_order))
        .route("/catalog", get(handle_get_catalog))
        .route("/pricing/quote", post(handle_quote))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing VR Config Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let intake: Option<Arc<IntakeClient>> = match &args.intake_url {
        Some(url) => {
            info!("Delivering finished orders to: {}", url);
            let client: IntakeClient =
                IntakeClient::new(url.clone(), Duration::from_secs(args.intake_timeout_secs))?;
            Some(Arc::new(client))
        }
        None => {
            warn!("No intake URL configured, finished orders will not be delivered");
            None
        }
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        live: Arc::new(LiveEventBroadcaster::new()),
        intake,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
