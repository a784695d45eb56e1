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

pub mod catalog;
mod error;
mod tier;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use catalog::{
    DeviceInfo, EnvironmentInfo, GameInfo, OptionInfo, compatible_environments,
    exclusive_counterpart, find_device, find_environment, find_game, find_option,
    is_analytics_option,
};
pub use error::DomainError;
pub use tier::{BRONZE_BASE_PRICE, GOLD_BASE_PRICE, SILVER_BASE_PRICE, Tier};
pub use types::{
    Custom3DSelection, DeviceLine, EnvironmentCompatibility, EnvironmentSelection, GameSelection,
    OptionSelection, OrderId, UserDetails, WizardStep,
};
pub use validation::{
    MAX_CUSTOM_3D_MODELS, MAX_DEVICES, MAX_EVENT_DAYS, MAX_GAMES, MAX_NAME_LENGTH, MIN_EVENT_DAYS,
    validate_custom_3d, validate_device_selection, validate_environment_choice,
    validate_game_selection, validate_option_names, validate_user_details, validate_work_email,
};
