// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tier classification and price composition.
//!
//! Both functions are pure: they read only the snapshot and the compiled-in
//! catalog, keep no history, and always recompute from scratch. Removing
//! the selection that triggered a tier lets the tier fall back to whatever
//! the remaining selections justify.

use crate::snapshot::OrderSnapshot;
use serde::{Deserialize, Serialize};
use vr_config_domain::{Tier, find_device, find_environment, find_game, find_option};

/// Total device quantity at which the order becomes Gold.
pub const GOLD_DEVICE_THRESHOLD: u32 = 3;
/// Total device quantity that makes the order Silver.
pub const SILVER_DEVICE_COUNT: u32 = 2;
/// Custom 3D model count at which the order becomes Gold.
pub const GOLD_CUSTOM_3D_THRESHOLD: u32 = 6;

/// The rule that decided an order's tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum TierReason {
    /// Two games are selected.
    MultiGame,
    /// A selected game is Gold.
    GoldGame { name: String },
    /// A selected environment is Gold.
    GoldEnvironment { name: String },
    /// Three or more devices are rented.
    LargeDeviceCount { quantity: u32 },
    /// Six or more bespoke 3D models are wanted.
    LargeCustom3D { count: u32 },
    /// A selected option is Gold.
    GoldOption { name: String },
    /// A selected game is Silver.
    SilverGame { name: String },
    /// A selected device type is Silver.
    SilverDevice { name: String },
    /// Exactly two devices are rented.
    TwoDevices,
    /// Between one and five bespoke 3D models are wanted.
    SmallCustom3D { count: u32 },
    /// A selected option is Silver.
    SilverOption { name: String },
}

impl TierReason {
    /// The tier this rule assigns.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        match self {
            Self::MultiGame
            | Self::GoldGame { .. }
            | Self::GoldEnvironment { .. }
            | Self::LargeDeviceCount { .. }
            | Self::LargeCustom3D { .. }
            | Self::GoldOption { .. } => Tier::Gold,
            Self::SilverGame { .. }
            | Self::SilverDevice { .. }
            | Self::TwoDevices
            | Self::SmallCustom3D { .. }
            | Self::SilverOption { .. } => Tier::Silver,
        }
    }
}

impl std::fmt::Display for TierReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MultiGame => write!(f, "Multiple games selected"),
            Self::GoldGame { name } | Self::SilverGame { name } => {
                write!(f, "{} game selected: {name}", self.tier())
            }
            Self::GoldEnvironment { name } => write!(f, "Gold environment selected: {name}"),
            Self::LargeDeviceCount { quantity } => write!(f, "{quantity} devices selected"),
            Self::LargeCustom3D { count } | Self::SmallCustom3D { count } => {
                write!(f, "{count} custom 3D models requested")
            }
            Self::GoldOption { name } | Self::SilverOption { name } => {
                write!(f, "{} option selected: {name}", self.tier())
            }
            Self::SilverDevice { name } => write!(f, "Silver device selected: {name}"),
            Self::TwoDevices => write!(f, "2 devices selected"),
        }
    }
}

/// A classified tier and the first rule that fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierClassification {
    pub tier: Tier,
    /// `None` when no rule fired and the order is Bronze.
    pub reason: Option<TierReason>,
}

/// The engine's output for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    pub tier: Tier,
    /// Fixed package price of `tier`.
    pub base_price: u64,
    /// Device rental total over all event days.
    pub device_price: u64,
    /// `base_price + device_price`.
    pub total_price: u64,
    pub reason: Option<TierReason>,
}

impl Default for PricingResult {
    fn default() -> Self {
        calculate_pricing(&OrderSnapshot::default())
    }
}

fn game_tier(name: &str) -> Tier {
    find_game(name).map_or(Tier::Bronze, |game| game.tier)
}

fn environment_tier(name: &str) -> Tier {
    find_environment(name).map_or(Tier::Bronze, |env| env.tier)
}

fn device_tier(name: &str) -> Tier {
    find_device(name).map_or(Tier::Bronze, |device| device.tier)
}

fn option_tier(name: &str) -> Tier {
    find_option(name).map_or(Tier::Bronze, |option| option.tier)
}

fn first_gold_reason(snapshot: &OrderSnapshot) -> Option<TierReason> {
    if snapshot.multi_game {
        return Some(TierReason::MultiGame);
    }
    if let Some(name) = snapshot
        .games
        .iter()
        .find(|name| game_tier(name) == Tier::Gold)
    {
        return Some(TierReason::GoldGame { name: name.clone() });
    }
    if let Some(name) = snapshot
        .environments
        .values()
        .find(|name| environment_tier(name) == Tier::Gold)
    {
        return Some(TierReason::GoldEnvironment { name: name.clone() });
    }
    let quantity: u32 = snapshot.total_devices();
    if quantity >= GOLD_DEVICE_THRESHOLD {
        return Some(TierReason::LargeDeviceCount { quantity });
    }
    if snapshot.wants_custom_3d && snapshot.custom_3d_count >= GOLD_CUSTOM_3D_THRESHOLD {
        return Some(TierReason::LargeCustom3D {
            count: snapshot.custom_3d_count,
        });
    }
    snapshot
        .options
        .iter()
        .find(|name| option_tier(name) == Tier::Gold)
        .map(|name| TierReason::GoldOption { name: name.clone() })
}

fn first_silver_reason(snapshot: &OrderSnapshot) -> Option<TierReason> {
    if let Some(name) = snapshot
        .games
        .iter()
        .find(|name| game_tier(name) == Tier::Silver)
    {
        return Some(TierReason::SilverGame { name: name.clone() });
    }
    if let Some(name) = snapshot
        .devices
        .keys()
        .find(|name| device_tier(name) == Tier::Silver)
    {
        return Some(TierReason::SilverDevice { name: name.clone() });
    }
    if snapshot.total_devices() == SILVER_DEVICE_COUNT {
        return Some(TierReason::TwoDevices);
    }
    if snapshot.wants_custom_3d
        && (1..GOLD_CUSTOM_3D_THRESHOLD).contains(&snapshot.custom_3d_count)
    {
        return Some(TierReason::SmallCustom3D {
            count: snapshot.custom_3d_count,
        });
    }
    snapshot
        .options
        .iter()
        .find(|name| option_tier(name) == Tier::Silver)
        .map(|name| TierReason::SilverOption { name: name.clone() })
}

/// Classifies an order into a tier.
///
/// Gold rules are evaluated entirely before any Silver rule, and within a
/// tier the first matching rule is reported. Names missing from the catalog
/// count as Bronze.
///
/// # Arguments
///
/// * `snapshot` - The order's selections; normalized before evaluation
#[must_use]
pub fn classify_tier(snapshot: &OrderSnapshot) -> TierClassification {
    let snapshot: OrderSnapshot = snapshot.normalized();
    let reason: Option<TierReason> =
        first_gold_reason(&snapshot).or_else(|| first_silver_reason(&snapshot));
    TierClassification {
        tier: reason.as_ref().map_or(Tier::Bronze, TierReason::tier),
        reason,
    }
}

/// Device rental total: per-day price times quantity times event days,
/// summed over every rented device type.
///
/// Unknown devices and zero quantities contribute nothing.
#[must_use]
pub fn device_price(snapshot: &OrderSnapshot) -> u64 {
    snapshot
        .devices
        .iter()
        .filter_map(|(name, quantity)| {
            find_device(name).map(|device| {
                u64::from(device.price_per_day)
                    .saturating_mul(u64::from(*quantity))
                    .saturating_mul(u64::from(snapshot.event_days))
            })
        })
        .fold(0_u64, u64::saturating_add)
}

/// Runs the full engine: classification plus price composition.
///
/// Never fails. An empty snapshot yields Bronze at the Bronze base price.
#[must_use]
pub fn calculate_pricing(snapshot: &OrderSnapshot) -> PricingResult {
    let TierClassification { tier, reason } = classify_tier(snapshot);
    let base_price: u64 = tier.base_price();
    let device_price: u64 = device_price(snapshot);
    PricingResult {
        tier,
        base_price,
        device_price,
        total_price: base_price.saturating_add(device_price),
        reason,
    }
}
