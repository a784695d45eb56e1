// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use vr_config_domain::{UserDetails, WizardStep};

/// A command represents user intent as data only.
///
/// Commands are the only way to request changes to an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the contact details.
    SaveUserDetails {
        details: UserDetails,
    },
    /// Replace the game selection.
    SelectGames {
        /// Game names, in selection order.
        games: Vec<String>,
        /// The multi-game toggle; a second game needs it on.
        multi_game: bool,
    },
    /// Choose the environment for one selected game.
    SelectEnvironment {
        game: String,
        environment: String,
    },
    /// Replace the device quantities and the shared event-day count.
    SetDevices {
        /// Device name and quantity pairs; zero removes the device.
        quantities: Vec<(String, u32)>,
        event_days: u32,
    },
    /// Replace the bespoke 3D model request.
    SetCustom3D {
        wanted: bool,
        count: u32,
    },
    /// Select an option if absent, deselect it if present.
    ToggleOption {
        option: String,
    },
    /// Replace the whole option set.
    ReplaceOptions {
        options: Vec<String>,
    },
    /// Move to the next step if the current one is complete.
    Advance {
        /// The game whose environment tab is focused on step 3.
        focused_game: Option<String>,
    },
    /// Move to the previous step.
    Retreat,
    /// Return to an earlier step from the review screen.
    JumpToStep {
        step: WizardStep,
    },
}

impl Command {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SaveUserDetails { .. } => "SaveUserDetails",
            Self::SelectGames { .. } => "SelectGames",
            Self::SelectEnvironment { .. } => "SelectEnvironment",
            Self::SetDevices { .. } => "SetDevices",
            Self::SetCustom3D { .. } => "SetCustom3D",
            Self::ToggleOption { .. } => "ToggleOption",
            Self::ReplaceOptions { .. } => "ReplaceOptions",
            Self::Advance { .. } => "Advance",
            Self::Retreat => "Retreat",
            Self::JumpToStep { .. } => "JumpToStep",
        }
    }
}
