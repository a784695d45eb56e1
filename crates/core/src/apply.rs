// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::gate::{StepValidation, evaluate_step};
use crate::state::{OrderState, SelectionCategory, TransitionResult};
use vr_config_domain::{
    Custom3DSelection, DeviceLine, DomainError, EnvironmentSelection, GameSelection,
    OptionSelection, UserDetails, WizardStep, exclusive_counterpart, find_device,
    find_environment, find_game, find_option, validate_custom_3d, validate_device_selection,
    validate_environment_choice, validate_game_selection, validate_option_names,
    validate_user_details,
};

/// Applies a command to an order, producing the new order.
///
/// This function is pure: it never touches the store and never recomputes
/// pricing. The caller saves the categories listed in the result and then
/// runs the engine on the reloaded order.
///
/// # Arguments
///
/// * `state` - The current order (immutable)
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new order and what changed
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The order has already been submitted
/// - The command violates a domain rule
/// - A navigation command is not allowed from the current step
pub fn apply(state: &OrderState, command: Command) -> Result<TransitionResult, CoreError> {
    if state.is_completed() {
        return Err(CoreError::OrderCompleted);
    }

    let mut new_state: OrderState = state.clone();
    let mut changed: Vec<SelectionCategory> = Vec::new();
    let mut step_changed: bool = false;

    match command {
        Command::SaveUserDetails { details } => {
            let details: UserDetails =
                UserDetails::new(&details.name, &details.company, &details.email);
            validate_user_details(&details)?;
            new_state.user = Some(details);
            changed.push(SelectionCategory::User);
        }
        Command::SelectGames { games, multi_game } => {
            validate_game_selection(&games, multi_game)?;
            new_state.games = games
                .iter()
                .map(|name| {
                    find_game(name)
                        .map(GameSelection::from)
                        .ok_or_else(|| DomainError::UnknownGame(name.clone()))
                })
                .collect::<Result<Vec<GameSelection>, DomainError>>()?;
            new_state.multi_game = multi_game;
            changed.push(SelectionCategory::Games);
            if new_state.prune_stale_environments() {
                changed.push(SelectionCategory::Environments);
            }
        }
        Command::SelectEnvironment { game, environment } => {
            validate_environment_choice(&state.game_names(), &game, &environment)?;
            let info = find_environment(&environment)
                .ok_or_else(|| DomainError::UnknownEnvironment(environment.clone()))?;
            let selection: EnvironmentSelection = EnvironmentSelection::for_game(&game, info);
            new_state.environments.retain(|env| env.game != game);
            new_state.environments.push(selection);
            changed.push(SelectionCategory::Environments);
        }
        Command::SetDevices {
            quantities,
            event_days,
        } => {
            validate_device_selection(&quantities, event_days)?;
            new_state.devices = merge_device_lines(&quantities)?;
            new_state.event_days = event_days;
            changed.push(SelectionCategory::Devices);
        }
        Command::SetCustom3D { wanted, count } => {
            if wanted {
                validate_custom_3d(count)?;
            }
            new_state.custom_3d = Some(Custom3DSelection::new(wanted, count));
            changed.push(SelectionCategory::Custom3D);
        }
        Command::ToggleOption { option } => {
            let info =
                find_option(&option).ok_or_else(|| DomainError::UnknownOption(option.clone()))?;
            if new_state.options.iter().any(|selected| selected.name == option) {
                new_state.options.retain(|selected| selected.name != option);
            } else {
                if let Some(counterpart) = exclusive_counterpart(&option) {
                    new_state
                        .options
                        .retain(|selected| selected.name != counterpart);
                }
                new_state.options.push(OptionSelection::from(info));
            }
            changed.push(SelectionCategory::Options);
        }
        Command::ReplaceOptions { options } => {
            validate_option_names(&options)?;
            let mut selections: Vec<OptionSelection> = Vec::with_capacity(options.len());
            for name in &options {
                if selections.iter().any(|selected| &selected.name == name) {
                    continue;
                }
                let info =
                    find_option(name).ok_or_else(|| DomainError::UnknownOption(name.clone()))?;
                selections.push(OptionSelection::from(info));
            }
            new_state.options = selections;
            changed.push(SelectionCategory::Options);
        }
        Command::Advance { focused_game } => {
            let next: WizardStep = state.step.next().ok_or(CoreError::NoNextStep)?;
            let gate: StepValidation = evaluate_step(state, state.step, focused_game.as_deref());
            if !gate.valid {
                return Err(CoreError::StepIncomplete {
                    step: state.step,
                    message: gate.message.unwrap_or_default(),
                });
            }
            new_state.step = next;
            step_changed = true;
        }
        Command::Retreat => {
            new_state.step = state.step.previous().ok_or(CoreError::NoPreviousStep)?;
            step_changed = true;
        }
        Command::JumpToStep { step } => {
            if step > state.step {
                return Err(CoreError::StepNotReached {
                    requested: step,
                    current: state.step,
                });
            }
            step_changed = step != state.step;
            new_state.step = step;
        }
    }

    Ok(TransitionResult {
        new_state,
        changed,
        step_changed,
    })
}

/// Builds stored device lines, merging repeated devices and dropping zero quantities.
fn merge_device_lines(quantities: &[(String, u32)]) -> Result<Vec<DeviceLine>, DomainError> {
    let mut lines: Vec<DeviceLine> = Vec::new();
    for (device, quantity) in quantities {
        if *quantity == 0 {
            continue;
        }
        if let Some(line) = lines.iter_mut().find(|line| &line.device == device) {
            line.quantity = line.quantity.saturating_add(*quantity);
            continue;
        }
        let info = find_device(device).ok_or_else(|| DomainError::UnknownDevice(device.clone()))?;
        lines.push(DeviceLine::new(info, *quantity));
    }
    Ok(lines)
}
