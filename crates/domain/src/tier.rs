// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Base package price for the Bronze tier, in whole US dollars.
pub const BRONZE_BASE_PRICE: u64 = 3499;
/// Base package price for the Silver tier, in whole US dollars.
pub const SILVER_BASE_PRICE: u64 = 5999;
/// Base package price for the Gold tier, in whole US dollars.
pub const GOLD_BASE_PRICE: u64 = 9999;

/// An ordered package level.
///
/// The derived ordering is `Bronze < Silver < Gold`, so `max` picks the
/// higher package.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Tier {
    /// Entry package.
    #[default]
    Bronze,
    /// Mid package.
    Silver,
    /// Top package.
    Gold,
}

impl Tier {
    /// All tiers in ascending order.
    pub const ALL: [Self; 3] = [Self::Bronze, Self::Silver, Self::Gold];

    /// Returns the fixed base price for this tier.
    #[must_use]
    pub const fn base_price(self) -> u64 {
        match self {
            Self::Bronze => BRONZE_BASE_PRICE,
            Self::Silver => SILVER_BASE_PRICE,
            Self::Gold => GOLD_BASE_PRICE,
        }
    }

    /// Converts this tier to its label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
        }
    }
}

impl FromStr for Tier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bronze" => Ok(Self::Bronze),
            "Silver" => Ok(Self::Silver),
            "Gold" => Ok(Self::Gold),
            _ => Err(DomainError::InvalidTier(s.to_string())),
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
