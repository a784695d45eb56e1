// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::OrderState;
use serde::{Deserialize, Serialize};
use vr_config_domain::{UserDetails, WizardStep, validate_user_details};

/// Soft warning shown on step 5 when custom models are wanted but none counted.
pub const CUSTOM_3D_COUNT_WARNING: &str =
    "Please select the number of 3D models you want to showcase";

/// Whether a step allows moving forward, with an optional message.
///
/// A valid step may still carry a message (a soft warning).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepValidation {
    pub valid: bool,
    pub message: Option<String>,
}

impl StepValidation {
    const fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    fn blocked(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            valid: true,
            message: Some(message.into()),
        }
    }
}

/// Evaluates the "can proceed" gate of one wizard step.
///
/// Failures are soft states, never errors.
///
/// # Arguments
///
/// * `state` - The current order
/// * `step` - The step to evaluate
/// * `focused_game` - On step 3 with two games, the game whose tab is focused
#[must_use]
pub fn evaluate_step(
    state: &OrderState,
    step: WizardStep,
    focused_game: Option<&str>,
) -> StepValidation {
    match step.value() {
        1 => evaluate_user_details(state.user.as_ref()),
        2 => {
            if state.games.is_empty() {
                StepValidation::blocked("Please select at least one game")
            } else {
                StepValidation::ok()
            }
        }
        3 => evaluate_environments(state, focused_game),
        4 => {
            if state.total_devices() == 0 {
                StepValidation::blocked("Please select at least one device")
            } else if state.event_days == 0 {
                StepValidation::blocked("Please select the number of event days")
            } else {
                StepValidation::ok()
            }
        }
        5 => match state.custom_3d {
            Some(selection) if selection.wanted && selection.count == 0 => {
                StepValidation::warning(CUSTOM_3D_COUNT_WARNING)
            }
            _ => StepValidation::ok(),
        },
        _ => StepValidation::ok(),
    }
}

fn evaluate_user_details(details: Option<&UserDetails>) -> StepValidation {
    let Some(details) = details else {
        return StepValidation::blocked("Please enter your contact details");
    };
    match validate_user_details(details) {
        Ok(()) => StepValidation::ok(),
        Err(err) => StepValidation::blocked(err.to_string()),
    }
}

fn evaluate_environments(state: &OrderState, focused_game: Option<&str>) -> StepValidation {
    if state.games.is_empty() {
        return StepValidation::blocked("Please select a game first");
    }

    let focused: Option<&str> = focused_game
        .filter(|name| state.games.len() > 1 && state.games.iter().any(|g| g.name == *name));

    let missing: Option<&str> = match focused {
        Some(game) => state.environment_for(game).is_none().then_some(game),
        None => state
            .games
            .iter()
            .map(|game| game.name.as_str())
            .find(|game| state.environment_for(game).is_none()),
    };

    missing.map_or_else(StepValidation::ok, |game| {
        StepValidation::blocked(format!("Please choose an environment for {game}"))
    })
}
