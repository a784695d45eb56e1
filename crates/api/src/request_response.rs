// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use crate::error::{ApiError, translate_domain_error};
use crate::submission::{SubmissionOutcome, SubmissionRecord};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use vr_config::{Command, OrderState, PricingResult, TierChange, TierReason, classify_tier};
use vr_config_domain::{
    Custom3DSelection, DeviceLine, EnvironmentSelection, GameSelection, OptionSelection,
    OrderId, Tier, UserDetails, WizardStep,
};

// ============================================================================
// Requests
// ============================================================================

/// API request to save the contact details (step 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveUserDetailsRequest {
    /// The contact's full name.
    pub name: String,
    /// The contact's company.
    pub company: String,
    /// The contact's work email.
    pub email: String,
}

impl From<SaveUserDetailsRequest> for Command {
    fn from(req: SaveUserDetailsRequest) -> Self {
        Self::SaveUserDetails {
            details: UserDetails::new(&req.name, &req.company, &req.email),
        }
    }
}

/// API request to replace the game selection (step 2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectGamesRequest {
    /// Game names, in selection order.
    pub games: Vec<String>,
    /// Whether multi-game mode is on.
    #[serde(default)]
    pub multi_game: bool,
}

impl From<SelectGamesRequest> for Command {
    fn from(req: SelectGamesRequest) -> Self {
        Self::SelectGames {
            games: req.games,
            multi_game: req.multi_game,
        }
    }
}

/// API request to choose the environment for one game (step 3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectEnvironmentRequest {
    pub game: String,
    pub environment: String,
}

impl From<SelectEnvironmentRequest> for Command {
    fn from(req: SelectEnvironmentRequest) -> Self {
        Self::SelectEnvironment {
            game: req.game,
            environment: req.environment,
        }
    }
}

/// One device line in a [`SetDevicesRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceQuantity {
    pub device: String,
    pub quantity: u32,
}

/// API request to replace device quantities and event days (step 4).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDevicesRequest {
    pub devices: Vec<DeviceQuantity>,
    /// Days the devices are rented for.
    pub event_days: u32,
}

impl From<SetDevicesRequest> for Command {
    fn from(req: SetDevicesRequest) -> Self {
        Self::SetDevices {
            quantities: req
                .devices
                .into_iter()
                .map(|line| (line.device, line.quantity))
                .collect(),
            event_days: req.event_days,
        }
    }
}

/// API request to set the bespoke 3D model request (step 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCustom3DRequest {
    pub wanted: bool,
    #[serde(default)]
    pub count: u32,
}

impl From<SetCustom3DRequest> for Command {
    fn from(req: SetCustom3DRequest) -> Self {
        Self::SetCustom3D {
            wanted: req.wanted,
            count: req.count,
        }
    }
}

/// API request to replace the whole option set (step 6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceOptionsRequest {
    pub options: Vec<String>,
}

impl From<ReplaceOptionsRequest> for Command {
    fn from(req: ReplaceOptionsRequest) -> Self {
        Self::ReplaceOptions {
            options: req.options,
        }
    }
}

/// API request to toggle a single option (step 6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleOptionRequest {
    pub option: String,
}

impl From<ToggleOptionRequest> for Command {
    fn from(req: ToggleOptionRequest) -> Self {
        Self::ToggleOption { option: req.option }
    }
}

/// API request to move through the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum NavigateRequest {
    /// Advance one step if the current step's gate passes.
    Next {
        /// On step 3 with two games, the game whose tab is focused.
        #[serde(default)]
        focused_game: Option<String>,
    },
    /// Go back one step.
    Back,
    /// Jump to an already reached step.
    Jump { step: u8 },
}

impl NavigateRequest {
    /// Converts this request into a core command.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if a jump targets a step outside 1..=7.
    pub fn into_command(self) -> Result<Command, ApiError> {
        match self {
            Self::Next { focused_game } => Ok(Command::Advance { focused_game }),
            Self::Back => Ok(Command::Retreat),
            Self::Jump { step } => {
                let step: WizardStep = WizardStep::new(step).map_err(translate_domain_error)?;
                Ok(Command::JumpToStep { step })
            }
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Tier and prices as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingView {
    pub tier: Tier,
    pub base_price: u64,
    pub device_price: u64,
    pub total_price: u64,
    /// The rule that set the tier; `None` for a plain Bronze order.
    pub reason: Option<TierReason>,
    /// Human-readable form of `reason`.
    pub reason_text: Option<String>,
}

impl From<&PricingResult> for PricingView {
    fn from(result: &PricingResult) -> Self {
        Self {
            tier: result.tier,
            base_price: result.base_price,
            device_price: result.device_price,
            total_price: result.total_price,
            reason_text: result.reason.as_ref().map(ToString::to_string),
            reason: result.reason.clone(),
        }
    }
}

/// The full order as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderView {
    pub order_id: OrderId,
    pub step: WizardStep,
    pub step_title: String,
    pub user: Option<UserDetails>,
    pub games: Vec<GameSelection>,
    pub multi_game: bool,
    pub environments: Vec<EnvironmentSelection>,
    pub devices: Vec<DeviceLine>,
    pub event_days: u32,
    pub custom_3d: Option<Custom3DSelection>,
    pub options: Vec<OptionSelection>,
    pub pricing: PricingView,
    pub revision: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
}

impl From<&OrderState> for OrderView {
    fn from(order: &OrderState) -> Self {
        // Prices come from the order row; the engine only supplies the reason.
        let reason: Option<TierReason> = classify_tier(&order.to_snapshot()).reason;
        Self {
            order_id: order.id,
            step: order.step,
            step_title: order.step.title().to_string(),
            user: order.user.clone(),
            games: order.games.clone(),
            multi_game: order.multi_game,
            environments: order.environments.clone(),
            devices: order.devices.clone(),
            event_days: order.event_days,
            custom_3d: order.custom_3d,
            options: order.options.clone(),
            pricing: PricingView {
                tier: order.pricing.tier,
                base_price: order.pricing.base_price,
                device_price: order.pricing.device_price,
                total_price: order.pricing.total_price,
                reason_text: reason.as_ref().map(ToString::to_string),
                reason,
            },
            revision: order.revision,
            created_at: order.created_at,
            updated_at: order.updated_at,
            completed_at: order.completed_at,
        }
    }
}

/// API response for a successful order command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub order: OrderView,
    /// How the tier moved as a result of this command.
    pub tier_change: TierChange,
    pub step_changed: bool,
}

/// API response for a stateless price quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub pricing: PricingView,
}

/// API response for a step's "can proceed" gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStatusResponse {
    pub step: WizardStep,
    pub title: String,
    pub valid: bool,
    /// Why the step is blocked, or a soft warning when it is valid.
    pub message: Option<String>,
}

/// The result of finishing an order, before delivery is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedOrder {
    pub order: OrderView,
    pub record: SubmissionRecord,
}

/// API response for a finished order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishResponse {
    pub order: OrderView,
    pub record: SubmissionRecord,
    pub submission: SubmissionOutcome,
}

/// A catalog game as listed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogGame {
    pub name: String,
    pub tier: Tier,
    /// Environments this game can be placed in.
    pub compatible_environments: Vec<String>,
    pub custom_3d_models: u8,
    pub unique_2d_slots: u8,
}

/// A catalog environment as listed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEnvironment {
    pub name: String,
    pub tier: Tier,
    pub slots_1x1: u8,
    pub slots_9x16: u8,
    pub slots_16x9: u8,
}

/// A catalog device package as listed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDevice {
    pub name: String,
    pub tier: Tier,
    pub price_per_day: u32,
}

/// A catalog add-on option as listed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogOption {
    pub name: String,
    pub tier: Tier,
}

/// A tier with its package price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogTier {
    pub tier: Tier,
    pub base_price: u64,
}

/// API response listing the full catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub tiers: Vec<CatalogTier>,
    pub games: Vec<CatalogGame>,
    pub environments: Vec<CatalogEnvironment>,
    pub devices: Vec<CatalogDevice>,
    pub options: Vec<CatalogOption>,
}
