// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use std::str::FromStr;
use tracing::debug;
use vr_config::{CachedPricing, OrderState};
use vr_config_domain::{
    Custom3DSelection, DeviceLine, EnvironmentCompatibility, EnvironmentSelection, GameSelection,
    OptionSelection, OrderId, Tier, UserDetails, WizardStep,
};

use crate::data_models::{OrderRecord, parse_timestamp};
use crate::diesel_schema::{
    order_custom_3d, order_devices, order_environments, order_games, order_options, order_users,
    orders,
};
use crate::error::PersistenceError;

/// Diesel Queryable struct for order rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = orders)]
struct OrderRow {
    order_id: String,
    created_at: String,
    updated_at: String,
    current_step: i32,
    multi_game: i32,
    event_days: i32,
    pricing_tier: String,
    base_price: i64,
    device_price: i64,
    total_price: i64,
    revision: i64,
    completed_at: Option<String>,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = order_users)]
struct UserRow {
    name: String,
    company: String,
    email: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = order_games)]
struct GameRow {
    game_name: String,
    tier: String,
    compatibility: String,
    custom_3d_models: i32,
    unique_2d_slots: i32,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = order_environments)]
struct EnvironmentRow {
    game_name: String,
    environment_name: String,
    tier: String,
    slots_1x1: i32,
    slots_9x16: i32,
    slots_16x9: i32,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = order_devices)]
struct DeviceRow {
    device_name: String,
    price_per_day: i32,
    tier: String,
    quantity: i32,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = order_custom_3d)]
struct Custom3DRow {
    wanted: i32,
    model_count: i32,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = order_options)]
struct OptionRow {
    option_name: String,
    tier: String,
}

fn parse_tier(value: &str) -> Result<Tier, PersistenceError> {
    Tier::from_str(value).map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

fn column_u8(value: i32, column: &str) -> Result<u8, PersistenceError> {
    value.to_u8().ok_or_else(|| {
        PersistenceError::ReconstructionError(format!("Invalid {column} value: {value}"))
    })
}

fn column_u32(value: i32, column: &str) -> Result<u32, PersistenceError> {
    value.to_u32().ok_or_else(|| {
        PersistenceError::ReconstructionError(format!("Invalid {column} value: {value}"))
    })
}

fn column_u64(value: i64, column: &str) -> Result<u64, PersistenceError> {
    value.to_u64().ok_or_else(|| {
        PersistenceError::ReconstructionError(format!("Invalid {column} value: {value}"))
    })
}

impl TryFrom<OrderRow> for OrderRecord {
    type Error = PersistenceError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let step: WizardStep = WizardStep::new(column_u8(row.current_step, "current_step")?)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        Ok(Self {
            order_id: OrderId::from_str(&row.order_id)
                .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
            step,
            multi_game: row.multi_game != 0,
            event_days: column_u32(row.event_days, "event_days")?,
            pricing: CachedPricing {
                tier: parse_tier(&row.pricing_tier)?,
                base_price: column_u64(row.base_price, "base_price")?,
                device_price: column_u64(row.device_price, "device_price")?,
                total_price: column_u64(row.total_price, "total_price")?,
            },
            revision: row.revision,
            completed_at: row
                .completed_at
                .as_deref()
                .map(parse_timestamp)
                .transpose()?,
        })
    }
}

/// Retrieves the order row without its selections.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `order_id` - The order to look up
///
/// # Errors
///
/// Returns an error if the query fails or the row is malformed.
/// Returns `Ok(None)` if the order is not found.
pub fn get_order(
    conn: &mut SqliteConnection,
    order_id: &OrderId,
) -> Result<Option<OrderRecord>, PersistenceError> {
    let row: Option<OrderRow> = orders::table
        .find(order_id.to_string())
        .select(OrderRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_order: {e}")))?;

    row.map(OrderRecord::try_from).transpose()
}

/// Loads the complete order aggregate: the order row plus every selection
/// category, each in its stored order.
///
/// # Errors
///
/// Returns `PersistenceError::OrderNotFound` if the order does not exist,
/// or an error if any query fails or a row is malformed.
pub fn get_complete_order(
    conn: &mut SqliteConnection,
    order_id: &OrderId,
) -> Result<OrderState, PersistenceError> {
    let record: OrderRecord = get_order(conn, order_id)?
        .ok_or_else(|| PersistenceError::OrderNotFound(order_id.to_string()))?;
    let id: String = order_id.to_string();

    let user: Option<UserDetails> = order_users::table
        .filter(order_users::order_id.eq(&id))
        .select(UserRow::as_select())
        .first(conn)
        .optional()?
        .map(|row: UserRow| UserDetails {
            name: row.name,
            company: row.company,
            email: row.email,
        });

    let games: Vec<GameSelection> = order_games::table
        .filter(order_games::order_id.eq(&id))
        .order(order_games::position.asc())
        .select(GameRow::as_select())
        .load(conn)?
        .into_iter()
        .map(|row: GameRow| -> Result<GameSelection, PersistenceError> {
            Ok(GameSelection {
                tier: parse_tier(&row.tier)?,
                compatibility: EnvironmentCompatibility::from_storage(&row.compatibility),
                custom_3d_models: column_u8(row.custom_3d_models, "custom_3d_models")?,
                unique_2d_slots: column_u8(row.unique_2d_slots, "unique_2d_slots")?,
                name: row.game_name,
            })
        })
        .collect::<Result<Vec<GameSelection>, PersistenceError>>()?;

    let environments: Vec<EnvironmentSelection> = order_environments::table
        .filter(order_environments::order_id.eq(&id))
        .order(order_environments::order_environment_id.asc())
        .select(EnvironmentRow::as_select())
        .load(conn)?
        .into_iter()
        .map(|row: EnvironmentRow| -> Result<EnvironmentSelection, PersistenceError> {
            Ok(EnvironmentSelection {
                tier: parse_tier(&row.tier)?,
                slots_1x1: column_u8(row.slots_1x1, "slots_1x1")?,
                slots_9x16: column_u8(row.slots_9x16, "slots_9x16")?,
                slots_16x9: column_u8(row.slots_16x9, "slots_16x9")?,
                game: row.game_name,
                name: row.environment_name,
            })
        })
        .collect::<Result<Vec<EnvironmentSelection>, PersistenceError>>()?;

    let devices: Vec<DeviceLine> = order_devices::table
        .filter(order_devices::order_id.eq(&id))
        .order(order_devices::position.asc())
        .select(DeviceRow::as_select())
        .load(conn)?
        .into_iter()
        .map(|row: DeviceRow| -> Result<DeviceLine, PersistenceError> {
            Ok(DeviceLine {
                price_per_day: column_u32(row.price_per_day, "price_per_day")?,
                tier: parse_tier(&row.tier)?,
                quantity: column_u32(row.quantity, "quantity")?,
                device: row.device_name,
            })
        })
        .collect::<Result<Vec<DeviceLine>, PersistenceError>>()?;

    let custom_3d: Option<Custom3DSelection> = order_custom_3d::table
        .filter(order_custom_3d::order_id.eq(&id))
        .select(Custom3DRow::as_select())
        .first(conn)
        .optional()?
        .map(|row: Custom3DRow| -> Result<Custom3DSelection, PersistenceError> {
            Ok(Custom3DSelection::new(
                row.wanted != 0,
                column_u32(row.model_count, "model_count")?,
            ))
        })
        .transpose()?;

    let options: Vec<OptionSelection> = order_options::table
        .filter(order_options::order_id.eq(&id))
        .order(order_options::position.asc())
        .select(OptionRow::as_select())
        .load(conn)?
        .into_iter()
        .map(|row: OptionRow| -> Result<OptionSelection, PersistenceError> {
            Ok(OptionSelection {
                tier: parse_tier(&row.tier)?,
                name: row.option_name,
            })
        })
        .collect::<Result<Vec<OptionSelection>, PersistenceError>>()?;

    debug!(
        order_id = %order_id,
        revision = record.revision,
        games = games.len(),
        devices = devices.len(),
        options = options.len(),
        "Loaded complete order"
    );

    Ok(OrderState {
        id: record.order_id,
        created_at: record.created_at,
        updated_at: record.updated_at,
        step: record.step,
        user,
        games,
        multi_game: record.multi_game,
        environments,
        devices,
        event_days: record.event_days,
        custom_3d,
        options,
        pricing: record.pricing,
        revision: record.revision,
        completed_at: record.completed_at,
    })
}
