// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions.
//!
//! Every order operation follows the same data flow: load the complete
//! order, apply the command, save each changed category as a full
//! replacement set, then reload and rerun the pricing engine. Callers must
//! hold exclusive access to the store for the whole sequence.

use time::OffsetDateTime;
use tracing::{debug, info};
use vr_config::{
    Command, OrderSnapshot, OrderState, PricingResult, SelectionCategory, SelectionSet,
    StepValidation, TierChange, TransitionResult, apply, calculate_pricing, evaluate_step,
};
use vr_config_domain::{Tier, WizardStep, catalog, compatible_environments};
use vr_config_persistence::{OrderUpdate, Persistence};

use crate::error::{ApiError, translate_core_error, translate_persistence_error};
use crate::recalculate::{Recalculation, recalculate_pricing};
use crate::request_response::{
    CatalogDevice, CatalogEnvironment, CatalogGame, CatalogOption, CatalogResponse, CatalogTier,
    CommandResponse, FinishedOrder, OrderView, PricingView, QuoteResponse, StepStatusResponse,
};
use crate::session::WizardSession;
use crate::submission::SubmissionRecord;

/// Loads the complete order, dropping environment selections whose game is
/// no longer selected.
///
/// A pruned order is saved and repriced before it is returned.
fn load_order(
    persistence: &mut Persistence,
    session: &WizardSession,
) -> Result<OrderState, ApiError> {
    let mut order: OrderState = persistence
        .get_complete_order(session.order_id())
        .map_err(translate_persistence_error)?;

    if order.is_completed() || !order.prune_stale_environments() {
        return Ok(order);
    }

    info!(order_id = %order.id, "Pruning stale environment selections");
    persistence
        .save_selections(
            &order.id,
            &order.selection_set(SelectionCategory::Environments),
        )
        .map_err(translate_persistence_error)?;
    let recalculation: Recalculation = recalculate_pricing(persistence, session.order_id())?;
    Ok(recalculation.order)
}

/// Starts a new order.
///
/// The order begins on step 1 with no selections, at Bronze for the
/// Bronze base price.
///
/// # Errors
///
/// Returns an error if the order cannot be stored.
pub fn start_order(persistence: &mut Persistence) -> Result<OrderView, ApiError> {
    let order: OrderState = persistence
        .create_order()
        .map_err(translate_persistence_error)?;
    Ok(OrderView::from(&order))
}

/// Resumes an existing order.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the order does not exist.
pub fn resume_order(
    persistence: &mut Persistence,
    session: &WizardSession,
) -> Result<OrderView, ApiError> {
    let order: OrderState = load_order(persistence, session)?;
    Ok(OrderView::from(&order))
}

/// Executes one order command.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `session` - The order being configured
/// * `command` - The command to apply
///
/// # Returns
///
/// The reloaded order with its recomputed pricing and how the tier moved.
///
/// # Errors
///
/// Returns an error if:
/// - The order does not exist or has been submitted
/// - The command violates a domain rule
/// - Navigation is blocked by the current step's gate
/// - The store fails
pub fn execute_command(
    persistence: &mut Persistence,
    session: &WizardSession,
    command: Command,
) -> Result<CommandResponse, ApiError> {
    let order: OrderState = load_order(persistence, session)?;
    let command_name: &'static str = command.name();

    let result: TransitionResult = apply(&order, command).map_err(translate_core_error)?;

    for category in &result.changed {
        let set: SelectionSet = result.new_state.selection_set(*category);
        persistence
            .save_selections(&order.id, &set)
            .map_err(translate_persistence_error)?;
    }

    if result.step_changed {
        persistence
            .update_order(
                &order.id,
                &OrderUpdate {
                    step: Some(result.new_state.step),
                    completed_at: None,
                },
            )
            .map_err(translate_persistence_error)?;
    }

    let (updated, tier_change): (OrderState, TierChange) = if result.changed.is_empty() {
        let reloaded: OrderState = persistence
            .get_complete_order(&order.id)
            .map_err(translate_persistence_error)?;
        let tier: Tier = reloaded.pricing.tier;
        (reloaded, TierChange::Unchanged { tier })
    } else {
        let recalculation: Recalculation = recalculate_pricing(persistence, &order.id)?;
        (recalculation.order, recalculation.tier_change)
    };

    debug!(
        order_id = %order.id,
        command = command_name,
        changed = ?result.changed,
        step = %updated.step,
        tier = %updated.pricing.tier,
        "Executed command"
    );

    Ok(CommandResponse {
        order: OrderView::from(&updated),
        tier_change,
        step_changed: result.step_changed,
    })
}

/// Prices a snapshot without touching any order.
#[must_use]
pub fn quote(snapshot: &OrderSnapshot) -> QuoteResponse {
    let pricing: PricingResult = calculate_pricing(snapshot);
    QuoteResponse {
        pricing: PricingView::from(&pricing),
    }
}

/// Evaluates one step's "can proceed" gate for an order.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `session` - The order being configured
/// * `step` - The step to evaluate
/// * `focused_game` - On step 3 with two games, the focused game tab
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the order does not exist.
pub fn step_status(
    persistence: &mut Persistence,
    session: &WizardSession,
    step: WizardStep,
    focused_game: Option<&str>,
) -> Result<StepStatusResponse, ApiError> {
    let order: OrderState = load_order(persistence, session)?;
    let validation: StepValidation = evaluate_step(&order, step, focused_game);
    Ok(StepStatusResponse {
        step,
        title: step.title().to_string(),
        valid: validation.valid,
        message: validation.message,
    })
}

/// Finishes an order on the review step.
///
/// Reprices the order one last time, marks it completed, and builds the
/// submission record. Delivery is left to the caller so the store is not
/// held during network I/O.
///
/// # Errors
///
/// Returns an error if:
/// - The order does not exist or was already submitted
/// - The order is not on the review step
/// - Any earlier step's gate does not pass
pub fn finish_order(
    persistence: &mut Persistence,
    session: &WizardSession,
) -> Result<FinishedOrder, ApiError> {
    let order: OrderState = load_order(persistence, session)?;

    if order.is_completed() {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("order_completed"),
            message: format!("Order '{}' has already been submitted", order.id),
        });
    }
    if order.step != WizardStep::LAST {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("finish_step"),
            message: format!(
                "Orders can only be finished on step {}, but this order is on step {}",
                WizardStep::LAST,
                order.step
            ),
        });
    }

    let mut step: WizardStep = WizardStep::FIRST;
    while step < WizardStep::LAST {
        let validation: StepValidation = evaluate_step(&order, step, None);
        if !validation.valid {
            return Err(ApiError::DomainRuleViolation {
                rule: String::from("step_incomplete"),
                message: format!(
                    "Step {step} is incomplete: {}",
                    validation.message.unwrap_or_default()
                ),
            });
        }
        let Some(next) = step.next() else {
            break;
        };
        step = next;
    }

    let recalculation: Recalculation = recalculate_pricing(persistence, session.order_id())?;
    let completed_at: OffsetDateTime = OffsetDateTime::now_utc();
    persistence
        .update_order(
            session.order_id(),
            &OrderUpdate {
                step: None,
                completed_at: Some(completed_at),
            },
        )
        .map_err(translate_persistence_error)?;

    let mut completed: OrderState = recalculation.order;
    completed.completed_at = Some(completed_at);
    let record: SubmissionRecord = SubmissionRecord::from_order(&completed, completed_at)?;

    info!(
        order_id = %completed.id,
        tier = %record.tier,
        total_price = record.total_price,
        "Order completed"
    );

    Ok(FinishedOrder {
        order: OrderView::from(&completed),
        record,
    })
}

/// Lists the full catalog with tiers and prices.
#[must_use]
pub fn list_catalog() -> CatalogResponse {
    CatalogResponse {
        tiers: Tier::ALL
            .iter()
            .map(|tier| CatalogTier {
                tier: *tier,
                base_price: tier.base_price(),
            })
            .collect(),
        games: catalog::GAMES
            .iter()
            .map(|game| CatalogGame {
                name: game.name.to_string(),
                tier: game.tier,
                compatible_environments: compatible_environments(game)
                    .iter()
                    .map(|env| env.name.to_string())
                    .collect(),
                custom_3d_models: game.custom_3d_models,
                unique_2d_slots: game.unique_2d_slots,
            })
            .collect(),
        environments: catalog::ENVIRONMENTS
            .iter()
            .map(|env| CatalogEnvironment {
                name: env.name.to_string(),
                tier: env.tier,
                slots_1x1: env.slots_1x1,
                slots_9x16: env.slots_9x16,
                slots_16x9: env.slots_16x9,
            })
            .collect(),
        devices: catalog::DEVICES
            .iter()
            .map(|device| CatalogDevice {
                name: device.name.to_string(),
                tier: device.tier,
                price_per_day: device.price_per_day,
            })
            .collect(),
        options: catalog::OPTIONS
            .iter()
            .map(|option| CatalogOption {
                name: option.name.to_string(),
                tier: option.tier,
            })
            .collect(),
    }
}
