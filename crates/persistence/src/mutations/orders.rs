// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order row mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use tracing::{debug, info};
use vr_config::{OrderState, PricingResult};
use vr_config_domain::OrderId;

use crate::data_models::{OrderUpdate, format_timestamp};
use crate::diesel_schema::orders;
use crate::error::PersistenceError;
use crate::mutations::{to_column_i32, to_column_i64};

/// Changeset for order-level updates; `None` fields are skipped.
#[derive(AsChangeset)]
#[diesel(table_name = orders)]
struct OrderChangeset {
    updated_at: String,
    current_step: Option<i32>,
    completed_at: Option<String>,
}

/// Inserts the order row for a freshly created order.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `order` - The initial order state (no selections)
///
/// # Errors
///
/// Returns an error if the row cannot be inserted.
pub fn create_order(
    conn: &mut SqliteConnection,
    order: &OrderState,
) -> Result<(), PersistenceError> {
    let order_id: String = order.id.to_string();
    let created_at: String = format_timestamp(order.created_at)?;

    diesel::insert_into(orders::table)
        .values((
            orders::order_id.eq(&order_id),
            orders::created_at.eq(&created_at),
            orders::updated_at.eq(&created_at),
            orders::current_step.eq(i32::from(order.step.value())),
            orders::multi_game.eq(i32::from(order.multi_game)),
            orders::event_days.eq(to_column_i32(order.event_days, "event_days")?),
            orders::pricing_tier.eq(order.pricing.tier.as_str()),
            orders::base_price.eq(to_column_i64(order.pricing.base_price, "base_price")?),
            orders::device_price.eq(to_column_i64(order.pricing.device_price, "device_price")?),
            orders::total_price.eq(to_column_i64(order.pricing.total_price, "total_price")?),
            orders::revision.eq(order.revision),
        ))
        .execute(conn)?;

    info!(order_id = %order.id, "Created order");
    Ok(())
}

/// Updates order-level fields.
///
/// Does not bump the revision: neither the step nor completion feeds the
/// pricing engine.
///
/// # Errors
///
/// Returns `PersistenceError::OrderNotFound` if the order does not exist.
pub fn update_order(
    conn: &mut SqliteConnection,
    order_id: &OrderId,
    update: &OrderUpdate,
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    let changeset: OrderChangeset = OrderChangeset {
        updated_at: format_timestamp(now)?,
        current_step: update.step.map(|step| i32::from(step.value())),
        completed_at: update.completed_at.map(format_timestamp).transpose()?,
    };

    let updated: usize = diesel::update(orders::table.find(order_id.to_string()))
        .set(&changeset)
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::OrderNotFound(order_id.to_string()));
    }

    debug!(
        order_id = %order_id,
        step = ?update.step,
        completed = update.completed_at.is_some(),
        "Updated order"
    );
    Ok(())
}

/// Bumps the order's revision and `updated_at`, returning the new revision.
///
/// # Errors
///
/// Returns `PersistenceError::OrderNotFound` if the order does not exist.
pub fn bump_revision(
    conn: &mut SqliteConnection,
    order_id: &OrderId,
    now: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    let id: String = order_id.to_string();
    let updated: usize = diesel::update(orders::table.find(&id))
        .set((
            orders::revision.eq(orders::revision + 1),
            orders::updated_at.eq(format_timestamp(now)?),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::OrderNotFound(id));
    }

    let revision: i64 = orders::table
        .find(&id)
        .select(orders::revision)
        .first(conn)?;
    Ok(revision)
}

/// Writes the engine's result onto the order, but only if the order is
/// still at `computed_at_revision`.
///
/// A result computed from an older revision is discarded, so a stale
/// recompute never overwrites a fresher one.
///
/// # Returns
///
/// `true` if the pricing was written, `false` if it was stale.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn record_pricing(
    conn: &mut SqliteConnection,
    order_id: &OrderId,
    computed_at_revision: i64,
    pricing: &PricingResult,
) -> Result<bool, PersistenceError> {
    let updated: usize = diesel::update(
        orders::table
            .filter(orders::order_id.eq(order_id.to_string()))
            .filter(orders::revision.eq(computed_at_revision)),
    )
    .set((
        orders::pricing_tier.eq(pricing.tier.as_str()),
        orders::base_price.eq(to_column_i64(pricing.base_price, "base_price")?),
        orders::device_price.eq(to_column_i64(pricing.device_price, "device_price")?),
        orders::total_price.eq(to_column_i64(pricing.total_price, "total_price")?),
    ))
    .execute(conn)?;

    let written: bool = updated > 0;
    debug!(
        order_id = %order_id,
        revision = computed_at_revision,
        tier = %pricing.tier,
        total_price = pricing.total_price,
        written,
        "Recorded pricing"
    );
    Ok(written)
}
