// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order submission to the external intake endpoint.
//!
//! A finished order is turned into a [`SubmissionRecord`]: the full
//! itemized order with contact details, tier, and prices. The record is
//! posted as JSON together with a plain-text summary meant for a human
//! reader. Delivery is retried with exponential backoff (1 s, 2 s, 4 s).
//!
//! Delivery failures are reported to the caller but never change the
//! stored order. The order stays completed either way.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{error, info, warn};
use vr_config::OrderState;
use vr_config_domain::{Custom3DSelection, OrderId, Tier, UserDetails};

use crate::error::ApiError;

/// Retry delays in seconds (exponential backoff: 1s, 2s, 4s).
pub const RETRY_DELAYS_SECS: [u64; 3] = [1, 2, 4];

/// Default HTTP request timeout for a single delivery attempt.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// A selected game in a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedGame {
    pub name: String,
    pub tier: Tier,
}

/// A chosen environment in a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedEnvironment {
    pub game: String,
    pub environment: String,
    pub tier: Tier,
}

/// A rented device line in a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedDevice {
    pub device: String,
    pub tier: Tier,
    pub quantity: u32,
    pub price_per_day: u32,
    pub event_days: u32,
    /// `price_per_day * quantity * event_days`.
    pub line_cost: u64,
}

/// A selected add-on option in a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedOption {
    pub name: String,
    pub tier: Tier,
}

/// Everything the intake endpoint receives about a finished order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub order_id: OrderId,
    #[serde(with = "time::serde::rfc3339")]
    pub completed_at: OffsetDateTime,
    pub user: UserDetails,
    pub tier: Tier,
    pub base_price: u64,
    pub device_price: u64,
    pub total_price: u64,
    pub games: Vec<SubmittedGame>,
    pub environments: Vec<SubmittedEnvironment>,
    pub devices: Vec<SubmittedDevice>,
    pub custom_3d: Option<Custom3DSelection>,
    pub options: Vec<SubmittedOption>,
}

impl SubmissionRecord {
    /// Builds the record for a completed order.
    ///
    /// Tier and prices are taken from the order's cached pricing, which is
    /// always the engine's last result.
    ///
    /// # Arguments
    ///
    /// * `order` - The complete order
    /// * `completed_at` - The completion timestamp
    ///
    /// # Errors
    ///
    /// Returns `ApiError::DomainRuleViolation` if the order has no contact
    /// details.
    pub fn from_order(order: &OrderState, completed_at: OffsetDateTime) -> Result<Self, ApiError> {
        let user: UserDetails = order.user.clone().ok_or_else(|| ApiError::DomainRuleViolation {
            rule: String::from("contact_details_required"),
            message: String::from("Contact details are required to submit an order"),
        })?;

        Ok(Self {
            order_id: order.id,
            completed_at,
            user,
            tier: order.pricing.tier,
            base_price: order.pricing.base_price,
            device_price: order.pricing.device_price,
            total_price: order.pricing.total_price,
            games: order
                .games
                .iter()
                .map(|game| SubmittedGame {
                    name: game.name.clone(),
                    tier: game.tier,
                })
                .collect(),
            environments: order
                .environments
                .iter()
                .map(|env| SubmittedEnvironment {
                    game: env.game.clone(),
                    environment: env.name.clone(),
                    tier: env.tier,
                })
                .collect(),
            devices: order
                .devices
                .iter()
                .map(|line| SubmittedDevice {
                    device: line.device.clone(),
                    tier: line.tier,
                    quantity: line.quantity,
                    price_per_day: line.price_per_day,
                    event_days: order.event_days,
                    line_cost: line.line_cost(order.event_days),
                })
                .collect(),
            custom_3d: order.custom_3d,
            options: order
                .options
                .iter()
                .map(|option| SubmittedOption {
                    name: option.name.clone(),
                    tier: option.tier,
                })
                .collect(),
        })
    }
}

/// Formats a whole-dollar amount as `$3,499`.
#[must_use]
pub fn format_usd(amount: u64) -> String {
    let digits: String = amount.to_string();
    let mut grouped: String = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("${grouped}")
}

fn bullet_list(items: Vec<String>, empty: &str) -> Vec<String> {
    if items.is_empty() {
        vec![format!("- {empty}")]
    } else {
        items.into_iter().map(|item| format!("- {item}")).collect()
    }
}

/// Renders the human-readable order summary sent alongside the record.
#[must_use]
pub fn format_plain_text_summary(record: &SubmissionRecord) -> String {
    let completed: String = record
        .completed_at
        .format(&Rfc3339)
        .unwrap_or_else(|_| record.completed_at.to_string());

    let mut lines: Vec<String> = vec![
        String::from("VR Configurator Order"),
        String::new(),
        format!("Order ID: {}", record.order_id),
        format!("Completed: {completed}"),
        format!("Pricing Tier: {}", record.tier),
        format!("Total Price: {}", format_usd(record.total_price)),
        String::new(),
        String::from("Customer Details:"),
        format!("- Name: {}", record.user.name),
        format!("- Company: {}", record.user.company),
        format!("- Email: {}", record.user.email),
        String::new(),
        String::from("Games:"),
    ];

    lines.extend(bullet_list(
        record
            .games
            .iter()
            .map(|game| format!("{} ({})", game.name, game.tier))
            .collect(),
        "No games selected",
    ));
    lines.push(String::new());
    lines.push(String::from("Environments:"));
    lines.extend(bullet_list(
        record
            .environments
            .iter()
            .map(|env| format!("{} → {} ({})", env.environment, env.game, env.tier))
            .collect(),
        "No environments selected",
    ));
    lines.push(String::new());
    lines.push(String::from("Devices:"));
    lines.extend(bullet_list(
        record
            .devices
            .iter()
            .map(|line| {
                format!(
                    "{} ×{} @ {}/day ({}d) = {}",
                    line.device,
                    line.quantity,
                    format_usd(u64::from(line.price_per_day)),
                    line.event_days,
                    format_usd(line.line_cost)
                )
            })
            .collect(),
        "No devices",
    ));
    lines.push(String::new());
    lines.push(String::from("Custom 3D:"));
    lines.push(match record.custom_3d {
        Some(selection) if selection.wanted && selection.count > 0 => {
            format!("- {} additional model(s)", selection.count)
        }
        _ => String::from("- No custom 3D models"),
    });
    lines.push(String::new());
    lines.push(String::from("Options:"));
    lines.extend(bullet_list(
        record
            .options
            .iter()
            .map(|option| format!("{} ({})", option.name, option.tier))
            .collect(),
        "No additional options",
    ));
    lines.extend([
        String::new(),
        String::from("Price Breakdown:"),
        format!("- Base Package: {}", format_usd(record.base_price)),
        format!("- Device Rental: {}", format_usd(record.device_price)),
        format!("- Total: {}", format_usd(record.total_price)),
        String::new(),
        String::from("Thank you!"),
    ]);

    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for intake delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The intake endpoint returned a non-2xx status code.
    #[error("Intake endpoint returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// IntakeClient
// ---------------------------------------------------------------------------

/// The JSON body posted to the intake endpoint.
#[derive(Debug, Serialize)]
struct IntakePayload<'a> {
    #[serde(rename = "_replyto")]
    reply_to: &'a str,
    #[serde(rename = "_subject")]
    subject: String,
    /// Plain-text summary for the notification body.
    message: String,
    #[serde(flatten)]
    record: &'a SubmissionRecord,
}

/// Posts finished orders to the configured intake URL.
#[derive(Debug, Clone)]
pub struct IntakeClient {
    client: reqwest::Client,
    url: String,
    retry_delays: Vec<Duration>,
}

impl IntakeClient {
    /// Creates a client for `url` with the given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SubmissionError> {
        let client: reqwest::Client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            retry_delays: RETRY_DELAYS_SECS
                .iter()
                .map(|secs| Duration::from_secs(*secs))
                .collect(),
        })
    }

    /// Replaces the backoff schedule. One retry is made per delay.
    #[must_use]
    pub fn with_retry_delays(mut self, retry_delays: Vec<Duration>) -> Self {
        self.retry_delays = retry_delays;
        self
    }

    /// The intake URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Delivers a submission with retry.
    ///
    /// Returns `Ok(())` on the first successful attempt.
    ///
    /// # Errors
    ///
    /// Returns the last attempt's error once every retry has failed.
    pub async fn submit(&self, record: &SubmissionRecord) -> Result<(), SubmissionError> {
        let payload: IntakePayload<'_> = IntakePayload {
            reply_to: &record.user.email,
            subject: format!("VR Configurator - Order {}", record.order_id),
            message: format_plain_text_summary(record),
            record,
        };

        let mut result: Result<(), SubmissionError> = self.try_send(&payload).await;
        for (attempt, delay) in self.retry_delays.iter().enumerate() {
            let Err(e) = &result else {
                break;
            };
            warn!(
                attempt = attempt + 1,
                url = %self.url,
                order_id = %record.order_id,
                error = %e,
                "Submission attempt failed, retrying"
            );
            tokio::time::sleep(*delay).await;
            result = self.try_send(&payload).await;
        }

        if let Err(e) = &result {
            error!(
                url = %self.url,
                order_id = %record.order_id,
                error = %e,
                "Submission failed after all retries"
            );
        }
        result
    }

    /// Executes a single POST request and checks the response status.
    async fn try_send(&self, payload: &IntakePayload<'_>) -> Result<(), SubmissionError> {
        let response: reqwest::Response = self.client.post(&self.url).json(payload).send().await?;
        if !response.status().is_success() {
            return Err(SubmissionError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// What happened when a finished order was handed to the intake endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    /// Whether an intake endpoint was configured.
    pub attempted: bool,
    pub delivered: bool,
    pub error: Option<String>,
}

/// Hands a record to the intake client, if one is configured.
///
/// Never fails: delivery errors are logged and reported in the outcome.
pub async fn deliver_submission(
    client: Option<&IntakeClient>,
    record: &SubmissionRecord,
) -> SubmissionOutcome {
    let Some(client) = client else {
        info!(
            order_id = %record.order_id,
            "No intake endpoint configured, skipping submission"
        );
        return SubmissionOutcome {
            attempted: false,
            delivered: false,
            error: None,
        };
    };

    match client.submit(record).await {
        Ok(()) => {
            info!(
                order_id = %record.order_id,
                url = %client.url(),
                total_price = record.total_price,
                "Order submitted"
            );
            SubmissionOutcome {
                attempted: true,
                delivered: true,
                error: None,
            }
        }
        Err(e) => SubmissionOutcome {
            attempted: true,
            delivered: false,
            error: Some(e.to_string()),
        },
    }
}
