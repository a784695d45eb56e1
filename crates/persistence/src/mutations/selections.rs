// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Selection saves.
//!
//! Every save replaces the whole category for the order: existing child
//! rows are deleted and the new set inserted inside one transaction, so
//! no orphaned rows survive a change.

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use tracing::debug;
use vr_config::SelectionSet;
use vr_config_domain::{
    Custom3DSelection, DeviceLine, EnvironmentSelection, GameSelection, OptionSelection, OrderId,
    UserDetails,
};

use crate::diesel_schema::{
    order_custom_3d, order_devices, order_environments, order_games, order_options, order_users,
    orders,
};
use crate::error::PersistenceError;
use crate::mutations::orders::bump_revision;
use crate::mutations::to_column_i32;

/// Saves one category's full replacement set and bumps the order revision.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `order_id` - The order the selections belong to
/// * `set` - The replacement set
/// * `now` - Timestamp written to `updated_at`
///
/// # Returns
///
/// The order's new revision.
///
/// # Errors
///
/// Returns an error if the order does not exist or any write fails. On
/// error nothing is written.
pub fn save_selections(
    conn: &mut SqliteConnection,
    order_id: &OrderId,
    set: &SelectionSet,
    now: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    let id: String = order_id.to_string();

    conn.transaction::<i64, PersistenceError, _>(|conn| {
        let revision: i64 = bump_revision(conn, order_id, now)?;

        match set {
            SelectionSet::User(details) => replace_user(conn, &id, details.as_ref())?,
            SelectionSet::Games { games, multi_game } => {
                replace_games(conn, &id, games)?;
                diesel::update(orders::table.find(&id))
                    .set(orders::multi_game.eq(i32::from(*multi_game)))
                    .execute(conn)?;
            }
            SelectionSet::Environments(environments) => {
                replace_environments(conn, &id, environments)?;
            }
            SelectionSet::Devices { lines, event_days } => {
                replace_devices(conn, &id, lines)?;
                diesel::update(orders::table.find(&id))
                    .set(orders::event_days.eq(to_column_i32(*event_days, "event_days")?))
                    .execute(conn)?;
            }
            SelectionSet::Custom3D(selection) => replace_custom_3d(conn, &id, *selection)?,
            SelectionSet::Options(options) => replace_options(conn, &id, options)?,
        }

        debug!(
            order_id = %order_id,
            category = %set.category(),
            revision,
            "Saved selections"
        );
        Ok(revision)
    })
}

fn replace_user(
    conn: &mut SqliteConnection,
    order_id: &str,
    details: Option<&UserDetails>,
) -> Result<(), PersistenceError> {
    diesel::delete(order_users::table.filter(order_users::order_id.eq(order_id))).execute(conn)?;
    if let Some(details) = details {
        diesel::insert_into(order_users::table)
            .values((
                order_users::order_id.eq(order_id),
                order_users::name.eq(&details.name),
                order_users::company.eq(&details.company),
                order_users::email.eq(&details.email),
            ))
            .execute(conn)?;
    }
    Ok(())
}

fn replace_games(
    conn: &mut SqliteConnection,
    order_id: &str,
    games: &[GameSelection],
) -> Result<(), PersistenceError> {
    diesel::delete(order_games::table.filter(order_games::order_id.eq(order_id))).execute(conn)?;
    for (position, game) in (0_i32..).zip(games) {
        diesel::insert_into(order_games::table)
            .values((
                order_games::order_id.eq(order_id),
                order_games::position.eq(position),
                order_games::game_name.eq(&game.name),
                order_games::tier.eq(game.tier.as_str()),
                order_games::compatibility.eq(game.compatibility.to_storage()),
                order_games::custom_3d_models.eq(i32::from(game.custom_3d_models)),
                order_games::unique_2d_slots.eq(i32::from(game.unique_2d_slots)),
            ))
            .execute(conn)?;
    }
    Ok(())
}

fn replace_environments(
    conn: &mut SqliteConnection,
    order_id: &str,
    environments: &[EnvironmentSelection],
) -> Result<(), PersistenceError> {
    diesel::delete(order_environments::table.filter(order_environments::order_id.eq(order_id)))
        .execute(conn)?;
    for environment in environments {
        diesel::insert_into(order_environments::table)
            .values((
                order_environments::order_id.eq(order_id),
                order_environments::game_name.eq(&environment.game),
                order_environments::environment_name.eq(&environment.name),
                order_environments::tier.eq(environment.tier.as_str()),
                order_environments::slots_1x1.eq(i32::from(environment.slots_1x1)),
                order_environments::slots_9x16.eq(i32::from(environment.slots_9x16)),
                order_environments::slots_16x9.eq(i32::from(environment.slots_16x9)),
            ))
            .execute(conn)?;
    }
    Ok(())
}

fn replace_devices(
    conn: &mut SqliteConnection,
    order_id: &str,
    lines: &[DeviceLine],
) -> Result<(), PersistenceError> {
    diesel::delete(order_devices::table.filter(order_devices::order_id.eq(order_id)))
        .execute(conn)?;
    for (position, line) in (0_i32..).zip(lines.iter().filter(|line| line.quantity > 0)) {
        diesel::insert_into(order_devices::table)
            .values((
                order_devices::order_id.eq(order_id),
                order_devices::position.eq(position),
                order_devices::device_name.eq(&line.device),
                order_devices::price_per_day.eq(to_column_i32(line.price_per_day, "price_per_day")?),
                order_devices::tier.eq(line.tier.as_str()),
                order_devices::quantity.eq(to_column_i32(line.quantity, "quantity")?),
            ))
            .execute(conn)?;
    }
    Ok(())
}

fn replace_custom_3d(
    conn: &mut SqliteConnection,
    order_id: &str,
    selection: Option<Custom3DSelection>,
) -> Result<(), PersistenceError> {
    diesel::delete(order_custom_3d::table.filter(order_custom_3d::order_id.eq(order_id)))
        .execute(conn)?;
    if let Some(selection) = selection {
        diesel::insert_into(order_custom_3d::table)
            .values((
                order_custom_3d::order_id.eq(order_id),
                order_custom_3d::wanted.eq(i32::from(selection.wanted)),
                order_custom_3d::model_count.eq(to_column_i32(selection.count, "model_count")?),
            ))
            .execute(conn)?;
    }
    Ok(())
}

fn replace_options(
    conn: &mut SqliteConnection,
    order_id: &str,
    options: &[OptionSelection],
) -> Result<(), PersistenceError> {
    diesel::delete(order_options::table.filter(order_options::order_id.eq(order_id)))
        .execute(conn)?;
    for (position, option) in (0_i32..).zip(options) {
        diesel::insert_into(order_options::table)
            .values((
                order_options::order_id.eq(order_id),
                order_options::position.eq(position),
                order_options::option_name.eq(&option.name),
                order_options::tier.eq(option.tier.as_str()),
            ))
            .execute(conn)?;
    }
    Ok(())
}
