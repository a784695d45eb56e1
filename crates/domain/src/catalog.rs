// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Static reference data: games, environments, devices, and add-on options.
//!
//! The catalog is compiled in and never mutated. Every item carries its
//! intrinsic tier; the pricing engine reads those tags, and selection
//! collectors copy them onto stored selections.

use crate::tier::Tier;
use serde::Serialize;

/// Name of the basic analytics option.
pub const ANALYTICS_BASIC: &str = "Analytics Basic";
/// Name of the advanced analytics option.
pub const ANALYTICS_ADVANCED: &str = "Analytics Advanced";

/// Email domains that are rejected as non-work addresses.
pub const FREE_EMAIL_DOMAINS: [&str; 7] = [
    "gmail.com",
    "outlook.com",
    "hotmail.com",
    "yandex.com",
    "yahoo.com",
    "aol.com",
    "protonmail.com",
];

/// A game offered by the configurator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameInfo {
    /// Display name, also the lookup key.
    pub name: &'static str,
    /// Intrinsic tier.
    pub tier: Tier,
    /// `None` means every environment is compatible.
    pub compatible_environments: Option<&'static [&'static str]>,
    /// Number of 3D models bundled with the game.
    pub custom_3d_models: u8,
    /// Number of 2D promotional slots the game exposes.
    pub unique_2d_slots: u8,
}

impl GameInfo {
    /// Returns whether `environment` may be paired with this game.
    #[must_use]
    pub fn is_compatible_with(&self, environment: &str) -> bool {
        self.compatible_environments
            .is_none_or(|allowed| allowed.contains(&environment))
    }
}

/// A virtual environment a game can be played in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnvironmentInfo {
    /// Display name, also the lookup key.
    pub name: &'static str,
    /// Intrinsic tier.
    pub tier: Tier,
    /// Square (1x1) promotional slots.
    pub slots_1x1: u8,
    /// Vertical (9x16) promotional slots.
    pub slots_9x16: u8,
    /// Horizontal (16x9) promotional slots.
    pub slots_16x9: u8,
}

/// A rentable headset package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// Display name, also the lookup key.
    pub name: &'static str,
    /// Rental price per device per event day, in whole US dollars.
    pub price_per_day: u32,
    /// Intrinsic tier.
    pub tier: Tier,
}

/// An add-on option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionInfo {
    /// Display name, also the lookup key.
    pub name: &'static str,
    /// Intrinsic tier.
    pub tier: Tier,
}

pub static GAMES: [GameInfo; 8] = [
    GameInfo {
        name: "Find the ball",
        tier: Tier::Bronze,
        compatible_environments: None,
        custom_3d_models: 0,
        unique_2d_slots: 0,
    },
    GameInfo {
        name: "Memory",
        tier: Tier::Bronze,
        compatible_environments: None,
        custom_3d_models: 0,
        unique_2d_slots: 8,
    },
    GameInfo {
        name: "Simon Says",
        tier: Tier::Bronze,
        compatible_environments: None,
        custom_3d_models: 0,
        unique_2d_slots: 0,
    },
    GameInfo {
        name: "Branded objects hunt",
        tier: Tier::Gold,
        compatible_environments: Some(&["Ancient Temple", "Autumn Forest"]),
        custom_3d_models: 3,
        unique_2d_slots: 0,
    },
    GameInfo {
        name: "Wheel of fortune",
        tier: Tier::Gold,
        compatible_environments: None,
        custom_3d_models: 0,
        unique_2d_slots: 5,
    },
    GameInfo {
        name: "Product Inspection",
        tier: Tier::Silver,
        compatible_environments: None,
        custom_3d_models: 3,
        unique_2d_slots: 0,
    },
    GameInfo {
        name: "Build the product",
        tier: Tier::Silver,
        compatible_environments: None,
        custom_3d_models: 3,
        unique_2d_slots: 0,
    },
    GameInfo {
        name: "Whack a mole",
        tier: Tier::Bronze,
        compatible_environments: None,
        custom_3d_models: 0,
        unique_2d_slots: 0,
    },
];

pub static ENVIRONMENTS: [EnvironmentInfo; 4] = [
    EnvironmentInfo {
        name: "Modern Office",
        tier: Tier::Bronze,
        slots_1x1: 3,
        slots_9x16: 1,
        slots_16x9: 4,
    },
    EnvironmentInfo {
        name: "Luxury Retail Space",
        tier: Tier::Bronze,
        slots_1x1: 2,
        slots_9x16: 1,
        slots_16x9: 2,
    },
    EnvironmentInfo {
        name: "Autumn Forest",
        tier: Tier::Bronze,
        slots_1x1: 2,
        slots_9x16: 1,
        slots_16x9: 2,
    },
    EnvironmentInfo {
        name: "Ancient Temple",
        tier: Tier::Gold,
        slots_1x1: 2,
        slots_9x16: 1,
        slots_16x9: 2,
    },
];

pub static DEVICES: [DeviceInfo; 2] = [
    DeviceInfo {
        name: "Meta Quest 3s standard device package",
        price_per_day: 30,
        tier: Tier::Bronze,
    },
    DeviceInfo {
        name: "Meta Quest 3 standard device package",
        price_per_day: 55,
        tier: Tier::Silver,
    },
];

pub static OPTIONS: [OptionInfo; 6] = [
    OptionInfo {
        name: "Leaderboard",
        tier: Tier::Silver,
    },
    OptionInfo {
        name: "Live chat support during event",
        tier: Tier::Silver,
    },
    OptionInfo {
        name: "VR game trailer creation",
        tier: Tier::Silver,
    },
    OptionInfo {
        name: "24/7 AI chat support",
        tier: Tier::Gold,
    },
    OptionInfo {
        name: ANALYTICS_BASIC,
        tier: Tier::Silver,
    },
    OptionInfo {
        name: ANALYTICS_ADVANCED,
        tier: Tier::Gold,
    },
];

/// Looks up a game by exact name.
#[must_use]
pub fn find_game(name: &str) -> Option<&'static GameInfo> {
    GAMES.iter().find(|game| game.name == name)
}

/// Looks up an environment by exact name.
#[must_use]
pub fn find_environment(name: &str) -> Option<&'static EnvironmentInfo> {
    ENVIRONMENTS.iter().find(|env| env.name == name)
}

/// Looks up a device package by exact name.
#[must_use]
pub fn find_device(name: &str) -> Option<&'static DeviceInfo> {
    DEVICES.iter().find(|device| device.name == name)
}

/// Looks up an add-on option by exact name.
#[must_use]
pub fn find_option(name: &str) -> Option<&'static OptionInfo> {
    OPTIONS.iter().find(|option| option.name == name)
}

/// Returns the environments a game may be paired with, in catalog order.
#[must_use]
pub fn compatible_environments(game: &GameInfo) -> Vec<&'static EnvironmentInfo> {
    ENVIRONMENTS
        .iter()
        .filter(|env| game.is_compatible_with(env.name))
        .collect()
}

/// Returns whether the option is one of the two mutually exclusive analytics options.
#[must_use]
pub fn is_analytics_option(name: &str) -> bool {
    name == ANALYTICS_BASIC || name == ANALYTICS_ADVANCED
}

/// Returns the analytics option that excludes `name`, if `name` is one.
#[must_use]
pub fn exclusive_counterpart(name: &str) -> Option<&'static str> {
    match name {
        ANALYTICS_BASIC => Some(ANALYTICS_ADVANCED),
        ANALYTICS_ADVANCED => Some(ANALYTICS_BASIC),
        _ => None,
    }
}
