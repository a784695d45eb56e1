// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::pricing::PricingResult;
use crate::snapshot::OrderSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use time::OffsetDateTime;
use vr_config_domain::{
    Custom3DSelection, DeviceLine, EnvironmentSelection, GameSelection, OptionSelection, OrderId,
    Tier, UserDetails, WizardStep,
};

/// Tier and prices cached on the order row.
///
/// Always a copy of the engine's last result; never edited by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedPricing {
    pub tier: Tier,
    pub base_price: u64,
    pub device_price: u64,
    pub total_price: u64,
}

impl From<&PricingResult> for CachedPricing {
    fn from(result: &PricingResult) -> Self {
        Self {
            tier: result.tier,
            base_price: result.base_price,
            device_price: result.device_price,
            total_price: result.total_price,
        }
    }
}

impl Default for CachedPricing {
    fn default() -> Self {
        Self::from(&PricingResult::default())
    }
}

/// The full order aggregate as loaded from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderState {
    pub id: OrderId,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub step: WizardStep,
    pub user: Option<UserDetails>,
    pub games: Vec<GameSelection>,
    /// The multi-game toggle as set by the user.
    pub multi_game: bool,
    pub environments: Vec<EnvironmentSelection>,
    pub devices: Vec<DeviceLine>,
    pub event_days: u32,
    pub custom_3d: Option<Custom3DSelection>,
    pub options: Vec<OptionSelection>,
    pub pricing: CachedPricing,
    /// Bumped by the store on every selection save.
    pub revision: i64,
    #[serde(with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
}

impl OrderState {
    /// Creates a fresh order: step 1, no selections, Bronze at base price.
    ///
    /// # Arguments
    ///
    /// * `id` - The order id
    /// * `now` - Creation timestamp
    #[must_use]
    pub fn new(id: OrderId, now: OffsetDateTime) -> Self {
        Self {
            id,
            created_at: now,
            updated_at: now,
            step: WizardStep::FIRST,
            user: None,
            games: Vec::new(),
            multi_game: false,
            environments: Vec::new(),
            devices: Vec::new(),
            event_days: 1,
            custom_3d: None,
            options: Vec::new(),
            pricing: CachedPricing::default(),
            revision: 0,
            completed_at: None,
        }
    }

    /// Returns whether the order has been submitted.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Names of the selected games, in selection order.
    #[must_use]
    pub fn game_names(&self) -> Vec<String> {
        self.games.iter().map(|game| game.name.clone()).collect()
    }

    /// The environment chosen for `game`, if any.
    #[must_use]
    pub fn environment_for(&self, game: &str) -> Option<&EnvironmentSelection> {
        self.environments.iter().find(|env| env.game == game)
    }

    /// Total quantity across all device lines.
    #[must_use]
    pub fn total_devices(&self) -> u32 {
        self.devices
            .iter()
            .fold(0_u32, |total, line| total.saturating_add(line.quantity))
    }

    /// Drops environment selections whose game is no longer selected, or
    /// whose game does not allow the chosen environment.
    ///
    /// Returns `true` if anything was removed.
    pub fn prune_stale_environments(&mut self) -> bool {
        let before: usize = self.environments.len();
        let games: &[GameSelection] = &self.games;
        self.environments.retain(|env| {
            games
                .iter()
                .any(|game| game.name == env.game && game.compatibility.allows(&env.name))
        });
        self.environments.len() != before
    }

    /// Builds the engine input from this order.
    #[must_use]
    pub fn to_snapshot(&self) -> OrderSnapshot {
        let custom_3d: Custom3DSelection = self.custom_3d.unwrap_or_default();
        OrderSnapshot {
            games: self.game_names(),
            multi_game: self.multi_game && self.games.len() > 1,
            environments: self
                .environments
                .iter()
                .map(|env| (env.game.clone(), env.name.clone()))
                .collect::<BTreeMap<String, String>>(),
            devices: self
                .devices
                .iter()
                .filter(|line| line.quantity > 0)
                .map(|line| (line.device.clone(), line.quantity))
                .collect::<BTreeMap<String, u32>>(),
            event_days: self.event_days,
            wants_custom_3d: custom_3d.wanted,
            custom_3d_count: custom_3d.count,
            options: self
                .options
                .iter()
                .map(|option| option.name.clone())
                .collect::<BTreeSet<String>>(),
        }
        .normalized()
    }

    /// Returns the full replacement set for one selection category.
    #[must_use]
    pub fn selection_set(&self, category: SelectionCategory) -> SelectionSet {
        match category {
            SelectionCategory::User => SelectionSet::User(self.user.clone()),
            SelectionCategory::Games => SelectionSet::Games {
                games: self.games.clone(),
                multi_game: self.multi_game,
            },
            SelectionCategory::Environments => {
                SelectionSet::Environments(self.environments.clone())
            }
            SelectionCategory::Devices => SelectionSet::Devices {
                lines: self.devices.clone(),
                event_days: self.event_days,
            },
            SelectionCategory::Custom3D => SelectionSet::Custom3D(self.custom_3d),
            SelectionCategory::Options => SelectionSet::Options(self.options.clone()),
        }
    }
}

/// One independently stored slice of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionCategory {
    User,
    Games,
    Environments,
    Devices,
    Custom3D,
    Options,
}

impl SelectionCategory {
    /// Converts this category to its string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Games => "games",
            Self::Environments => "environments",
            Self::Devices => "devices",
            Self::Custom3D => "custom_3d",
            Self::Options => "options",
        }
    }
}

impl std::fmt::Display for SelectionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A full replacement set for one category, as saved by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionSet {
    User(Option<UserDetails>),
    Games {
        games: Vec<GameSelection>,
        multi_game: bool,
    },
    Environments(Vec<EnvironmentSelection>),
    Devices {
        lines: Vec<DeviceLine>,
        event_days: u32,
    },
    Custom3D(Option<Custom3DSelection>),
    Options(Vec<OptionSelection>),
}

impl SelectionSet {
    /// The category this set replaces.
    #[must_use]
    pub const fn category(&self) -> SelectionCategory {
        match self {
            Self::User(_) => SelectionCategory::User,
            Self::Games { .. } => SelectionCategory::Games,
            Self::Environments(_) => SelectionCategory::Environments,
            Self::Devices { .. } => SelectionCategory::Devices,
            Self::Custom3D(_) => SelectionCategory::Custom3D,
            Self::Options(_) => SelectionCategory::Options,
        }
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: OrderState,
    /// Categories whose full replacement sets must be saved, in save order.
    pub changed: Vec<SelectionCategory>,
    /// Whether the current step moved.
    pub step_changed: bool,
}

/// How the tier moved between two pricing results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "direction", rename_all = "snake_case")]
pub enum TierChange {
    Upgraded { from: Tier, to: Tier },
    Downgraded { from: Tier, to: Tier },
    Unchanged { tier: Tier },
}

impl TierChange {
    /// Compares the previous tier with the newly computed one.
    #[must_use]
    pub fn between(previous: Tier, current: Tier) -> Self {
        match previous.cmp(&current) {
            std::cmp::Ordering::Less => Self::Upgraded {
                from: previous,
                to: current,
            },
            std::cmp::Ordering::Greater => Self::Downgraded {
                from: previous,
                to: current,
            },
            std::cmp::Ordering::Equal => Self::Unchanged { tier: current },
        }
    }

    /// Returns whether the tier went up.
    #[must_use]
    pub const fn is_upgrade(&self) -> bool {
        matches!(self, Self::Upgraded { .. })
    }
}
