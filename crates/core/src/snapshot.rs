// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The complete set of selections for one order at a point in time.
///
/// This is the sole input of the pricing engine. Every field is optional on
/// the wire: a missing category deserializes to "no selection", and a
/// missing `event_days` defaults to 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderSnapshot {
    /// Selected game names, in selection order.
    pub games: Vec<String>,
    /// Whether multi-game mode is active.
    ///
    /// After normalization this is true exactly when two games are selected.
    pub multi_game: bool,
    /// Chosen environment per game name.
    pub environments: BTreeMap<String, String>,
    /// Quantity per device name.
    pub devices: BTreeMap<String, u32>,
    /// Event days shared by every device line.
    pub event_days: u32,
    /// Whether bespoke 3D models are wanted.
    pub wants_custom_3d: bool,
    /// Number of bespoke 3D models.
    pub custom_3d_count: u32,
    /// Selected add-on option names.
    pub options: BTreeSet<String>,
}

impl Default for OrderSnapshot {
    fn default() -> Self {
        Self {
            games: Vec::new(),
            multi_game: false,
            environments: BTreeMap::new(),
            devices: BTreeMap::new(),
            event_days: 1,
            wants_custom_3d: false,
            custom_3d_count: 0,
            options: BTreeSet::new(),
        }
    }
}

impl OrderSnapshot {
    /// Returns a sanitized copy of this snapshot.
    ///
    /// - duplicate game names are collapsed, keeping the first occurrence
    /// - environments of games that are not selected are dropped
    /// - device entries with a zero quantity are dropped
    /// - `multi_game` is derived from the number of selected games
    ///
    /// Normalizing an already normalized snapshot returns it unchanged.
    /// Analytics option exclusivity is guaranteed by callers and is not
    /// repaired here.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut games: Vec<String> = Vec::with_capacity(self.games.len());
        for game in &self.games {
            if !games.contains(game) {
                games.push(game.clone());
            }
        }

        let environments: BTreeMap<String, String> = self
            .environments
            .iter()
            .filter(|(game, _)| games.contains(game))
            .map(|(game, env)| (game.clone(), env.clone()))
            .collect();

        let devices: BTreeMap<String, u32> = self
            .devices
            .iter()
            .filter(|(_, quantity)| **quantity > 0)
            .map(|(device, quantity)| (device.clone(), *quantity))
            .collect();

        Self {
            multi_game: games.len() > 1,
            games,
            environments,
            devices,
            event_days: self.event_days,
            wants_custom_3d: self.wants_custom_3d,
            custom_3d_count: self.custom_3d_count,
            options: self.options.clone(),
        }
    }

    /// Total quantity across all device lines.
    #[must_use]
    pub fn total_devices(&self) -> u32 {
        self.devices
            .values()
            .fold(0_u32, |total, quantity| total.saturating_add(*quantity))
    }
}
