// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::catalog::{DeviceInfo, EnvironmentInfo, GameInfo, OptionInfo};
use crate::error::DomainError;
use crate::tier::Tier;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Generates a fresh random order id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    #[must_use]
    pub const fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for OrderId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| DomainError::InvalidOrderId(s.to_string()))
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A position in the seven-step wizard.
///
/// Steps are: 1 contact details, 2 games, 3 environments, 4 devices,
/// 5 custom 3D models, 6 add-on options, 7 review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WizardStep(u8);

impl WizardStep {
    /// First step (contact details).
    pub const FIRST: Self = Self(1);
    /// Last step (review).
    pub const LAST: Self = Self(7);

    /// Creates a validated step.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStep` if `value` is outside 1..=7.
    pub const fn new(value: u8) -> Result<Self, DomainError> {
        if value >= Self::FIRST.0 && value <= Self::LAST.0 {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidStep(value))
        }
    }

    /// Returns the step number.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the following step, or `None` on the review step.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        if self.0 < Self::LAST.0 {
            Some(Self(self.0 + 1))
        } else {
            None
        }
    }

    /// Returns the preceding step, or `None` on the first step.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        if self.0 > Self::FIRST.0 {
            Some(Self(self.0 - 1))
        } else {
            None
        }
    }

    /// Human-readable title of the step.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self.0 {
            1 => "Your details",
            2 => "Games",
            3 => "Environments",
            4 => "Devices",
            5 => "Custom 3D models",
            6 => "Options",
            _ => "Review",
        }
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        step.0
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contact details entered on the first step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    /// Contact name.
    pub name: String,
    /// Company name.
    pub company: String,
    /// Work email address.
    pub email: String,
}

impl UserDetails {
    /// Creates user details from raw form input.
    ///
    /// Surrounding whitespace is trimmed from every field.
    #[must_use]
    pub fn new(name: &str, company: &str, email: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            company: company.trim().to_string(),
            email: email.trim().to_string(),
        }
    }
}

/// Which environments a game may be played in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "environments", rename_all = "snake_case")]
pub enum EnvironmentCompatibility {
    /// Every environment is compatible.
    All,
    /// Only the listed environments are compatible.
    Only(Vec<String>),
}

impl EnvironmentCompatibility {
    /// Returns whether `environment` is allowed.
    #[must_use]
    pub fn allows(&self, environment: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(allowed) => allowed.iter().any(|name| name == environment),
        }
    }

    /// Storage form: `"All"` or a comma separated list.
    #[must_use]
    pub fn to_storage(&self) -> String {
        match self {
            Self::All => String::from("All"),
            Self::Only(allowed) => allowed.join(","),
        }
    }

    /// Parses the storage form written by [`Self::to_storage`].
    #[must_use]
    pub fn from_storage(value: &str) -> Self {
        if value == "All" {
            return Self::All;
        }
        Self::Only(
            value
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

impl From<Option<&'static [&'static str]>> for EnvironmentCompatibility {
    fn from(value: Option<&'static [&'static str]>) -> Self {
        value.map_or(Self::All, |allowed| {
            Self::Only(allowed.iter().map(|name| (*name).to_string()).collect())
        })
    }
}

/// A selected game with the catalog attributes captured at selection time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSelection {
    pub name: String,
    pub tier: Tier,
    pub compatibility: EnvironmentCompatibility,
    pub custom_3d_models: u8,
    pub unique_2d_slots: u8,
}

impl From<&GameInfo> for GameSelection {
    fn from(info: &GameInfo) -> Self {
        Self {
            name: info.name.to_string(),
            tier: info.tier,
            compatibility: EnvironmentCompatibility::from(info.compatible_environments),
            custom_3d_models: info.custom_3d_models,
            unique_2d_slots: info.unique_2d_slots,
        }
    }
}

/// The environment chosen for one selected game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentSelection {
    /// The owning game.
    pub game: String,
    pub name: String,
    pub tier: Tier,
    pub slots_1x1: u8,
    pub slots_9x16: u8,
    pub slots_16x9: u8,
}

impl EnvironmentSelection {
    /// Captures a catalog environment for `game`.
    #[must_use]
    pub fn for_game(game: &str, info: &EnvironmentInfo) -> Self {
        Self {
            game: game.to_string(),
            name: info.name.to_string(),
            tier: info.tier,
            slots_1x1: info.slots_1x1,
            slots_9x16: info.slots_9x16,
            slots_16x9: info.slots_16x9,
        }
    }
}

/// One rented device type and its quantity.
///
/// Lines with a quantity of zero are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceLine {
    pub device: String,
    /// Rental price per device per event day.
    pub price_per_day: u32,
    pub tier: Tier,
    pub quantity: u32,
}

impl DeviceLine {
    /// Captures a catalog device at the given quantity.
    #[must_use]
    pub fn new(info: &DeviceInfo, quantity: u32) -> Self {
        Self {
            device: info.name.to_string(),
            price_per_day: info.price_per_day,
            tier: info.tier,
            quantity,
        }
    }

    /// Rental cost of this line over `event_days`.
    #[must_use]
    pub fn line_cost(&self, event_days: u32) -> u64 {
        u64::from(self.price_per_day) * u64::from(self.quantity) * u64::from(event_days)
    }
}

/// Whether bespoke 3D models are wanted, and how many.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Custom3DSelection {
    pub wanted: bool,
    /// Always zero when `wanted` is false.
    pub count: u32,
}

impl Custom3DSelection {
    /// Creates a selection, forcing the count to zero when not wanted.
    #[must_use]
    pub const fn new(wanted: bool, count: u32) -> Self {
        Self {
            wanted,
            count: if wanted { count } else { 0 },
        }
    }
}

/// A selected add-on option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSelection {
    pub name: String,
    pub tier: Tier,
}

impl From<&OptionInfo> for OptionSelection {
    fn from(info: &OptionInfo) -> Self {
        Self {
            name: info.name.to_string(),
            tier: info.tier,
        }
    }
}
