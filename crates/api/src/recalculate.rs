// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pricing recalculation after a selection change.

use crate::error::{ApiError, translate_persistence_error};
use tracing::{debug, info};
use vr_config::{CachedPricing, OrderState, PricingResult, TierChange, calculate_pricing};
use vr_config_domain::OrderId;
use vr_config_persistence::Persistence;

/// The outcome of one recalculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recalculation {
    /// The order as reloaded from the store, with the new pricing applied
    /// when it was recorded.
    pub order: OrderState,
    /// The engine's result for the reloaded order.
    pub pricing: PricingResult,
    /// How the tier moved relative to the previously cached tier.
    pub tier_change: TierChange,
    /// Whether the result was written. `false` means a newer save landed
    /// first and this result was discarded.
    pub recorded: bool,
}

/// Reloads the complete order, runs the engine on it, and records the
/// result against the revision it was computed from.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `order_id` - The order to recalculate
///
/// # Errors
///
/// Returns an error if the order does not exist or the store fails.
pub fn recalculate_pricing(
    persistence: &mut Persistence,
    order_id: &OrderId,
) -> Result<Recalculation, ApiError> {
    let mut order: OrderState = persistence
        .get_complete_order(order_id)
        .map_err(translate_persistence_error)?;

    let pricing: PricingResult = calculate_pricing(&order.to_snapshot());
    let tier_change: TierChange = TierChange::between(order.pricing.tier, pricing.tier);

    let recorded: bool = persistence
        .record_pricing(order_id, order.revision, &pricing)
        .map_err(translate_persistence_error)?;

    if recorded {
        order.pricing = CachedPricing::from(&pricing);
        if tier_change.is_upgrade() {
            info!(
                order_id = %order_id,
                tier = %pricing.tier,
                reason = ?pricing.reason,
                "Order upgraded"
            );
        }
    } else {
        debug!(
            order_id = %order_id,
            revision = order.revision,
            "Discarded stale pricing result"
        );
    }

    Ok(Recalculation {
        order,
        pricing,
        tier_change,
        recorded,
    })
}
