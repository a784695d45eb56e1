// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::catalog::{
    FREE_EMAIL_DOMAINS, find_device, find_environment, find_game, find_option,
    is_analytics_option,
};
use crate::error::DomainError;
use crate::types::UserDetails;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Maximum length of the contact name and company name, in characters.
pub const MAX_NAME_LENGTH: usize = 50;
/// Maximum number of concurrently selected games (multi-game mode).
pub const MAX_GAMES: usize = 2;
/// Maximum total device quantity across all device types.
pub const MAX_DEVICES: u32 = 4;
/// Minimum number of event days.
pub const MIN_EVENT_DAYS: u32 = 1;
/// Maximum number of event days.
pub const MAX_EVENT_DAYS: u32 = 30;
/// Maximum number of bespoke 3D models.
pub const MAX_CUSTOM_3D_MODELS: u32 = 10;

/// `local@domain.tld` with no whitespace and exactly one `@`.
static EMAIL_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

/// Validates the contact details entered on the first step.
///
/// # Arguments
///
/// * `details` - The contact details to validate
///
/// # Errors
///
/// Returns an error if:
/// - The trimmed name is empty or longer than 50 characters
/// - The trimmed company is empty or longer than 50 characters
/// - The email is empty, malformed, or on a free-mail domain
pub fn validate_user_details(details: &UserDetails) -> Result<(), DomainError> {
    let name: &str = details.name.trim();
    if name.is_empty() {
        return Err(DomainError::InvalidName(String::from("Name is required")));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidName(format!(
            "Name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }

    let company: &str = details.company.trim();
    if company.is_empty() {
        return Err(DomainError::InvalidCompany(String::from(
            "Company is required",
        )));
    }
    if company.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidCompany(format!(
            "Company must be at most {MAX_NAME_LENGTH} characters"
        )));
    }

    validate_work_email(details.email.trim())
}

/// Validates a work email address.
///
/// The address must look like `local@domain.tld`, contain no whitespace,
/// and must not use a free-mail domain.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` describing the first failed rule.
pub fn validate_work_email(email: &str) -> Result<(), DomainError> {
    if email.is_empty() {
        return Err(DomainError::InvalidEmail(String::from("Email is required")));
    }

    let pattern: &Regex = EMAIL_PATTERN
        .as_ref()
        .map_err(|e| DomainError::InvalidEmail(format!("Email pattern failed to build: {e}")))?;
    if !pattern.is_match(email) {
        return Err(DomainError::InvalidEmail(String::from(
            "Please enter a valid email address",
        )));
    }

    let domain: String = email
        .rsplit('@')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    if FREE_EMAIL_DOMAINS.contains(&domain.as_str()) {
        return Err(DomainError::InvalidEmail(String::from(
            "Please use your work email address",
        )));
    }

    Ok(())
}

/// Validates a complete game selection.
///
/// # Arguments
///
/// * `games` - Selected game names, in selection order
/// * `multi_game` - Whether multi-game mode is toggled on
///
/// # Errors
///
/// Returns an error if:
/// - More than one game is selected without multi-game mode
/// - More than two games are selected
/// - A game is selected twice
/// - A game is not in the catalog
pub fn validate_game_selection(games: &[String], multi_game: bool) -> Result<(), DomainError> {
    let max: usize = if multi_game { MAX_GAMES } else { 1 };
    if games.len() > max {
        return Err(DomainError::TooManyGames {
            requested: games.len(),
            max,
        });
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for game in games {
        if find_game(game).is_none() {
            return Err(DomainError::UnknownGame(game.clone()));
        }
        if !seen.insert(game.as_str()) {
            return Err(DomainError::DuplicateGame(game.clone()));
        }
    }

    Ok(())
}

/// Validates an environment choice for one game.
///
/// # Arguments
///
/// * `selected_games` - Names of the currently selected games
/// * `game` - The game the environment is chosen for
/// * `environment` - The chosen environment
///
/// # Errors
///
/// Returns an error if the game is not selected, the environment is not in
/// the catalog, or the game does not allow the environment.
pub fn validate_environment_choice(
    selected_games: &[String],
    game: &str,
    environment: &str,
) -> Result<(), DomainError> {
    if !selected_games.iter().any(|name| name == game) {
        return Err(DomainError::GameNotSelected(game.to_string()));
    }
    let game_info = find_game(game).ok_or_else(|| DomainError::UnknownGame(game.to_string()))?;
    if find_environment(environment).is_none() {
        return Err(DomainError::UnknownEnvironment(environment.to_string()));
    }
    if !game_info.is_compatible_with(environment) {
        return Err(DomainError::IncompatibleEnvironment {
            game: game.to_string(),
            environment: environment.to_string(),
        });
    }
    Ok(())
}

/// Validates device quantities and the shared event-day count.
///
/// # Arguments
///
/// * `quantities` - Device name and quantity pairs; zero quantities are allowed
///   and mean "not rented"
/// * `event_days` - Number of event days shared by every device line
///
/// # Errors
///
/// Returns an error if a device is unknown, the total quantity exceeds 4,
/// or `event_days` is outside 1..=30.
pub fn validate_device_selection(
    quantities: &[(String, u32)],
    event_days: u32,
) -> Result<(), DomainError> {
    if !(MIN_EVENT_DAYS..=MAX_EVENT_DAYS).contains(&event_days) {
        return Err(DomainError::InvalidEventDays { days: event_days });
    }

    let mut total: u32 = 0;
    for (device, quantity) in quantities {
        if find_device(device).is_none() {
            return Err(DomainError::UnknownDevice(device.clone()));
        }
        total = total.saturating_add(*quantity);
    }

    if total > MAX_DEVICES {
        return Err(DomainError::TooManyDevices {
            requested: total,
            max: MAX_DEVICES,
        });
    }

    Ok(())
}

/// Validates the bespoke 3D model count.
///
/// # Errors
///
/// Returns `DomainError::InvalidCustom3DCount` if `count` exceeds 10.
pub const fn validate_custom_3d(count: u32) -> Result<(), DomainError> {
    if count > MAX_CUSTOM_3D_MODELS {
        return Err(DomainError::InvalidCustom3DCount { count });
    }
    Ok(())
}

/// Validates a full replacement set of option names.
///
/// # Errors
///
/// Returns an error if an option is unknown or both analytics options are present.
pub fn validate_option_names(options: &[String]) -> Result<(), DomainError> {
    for option in options {
        if find_option(option).is_none() {
            return Err(DomainError::UnknownOption(option.clone()));
        }
    }

    let analytics: HashSet<&str> = options
        .iter()
        .map(String::as_str)
        .filter(|name| is_analytics_option(name))
        .collect();
    if analytics.len() > 1 {
        return Err(DomainError::ConflictingAnalyticsOptions);
    }

    Ok(())
}
