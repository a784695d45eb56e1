// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Contact name is empty or too long.
    InvalidName(String),
    /// Company name is empty or too long.
    InvalidCompany(String),
    /// Email is empty, malformed, or uses a free-mail domain.
    InvalidEmail(String),
    /// Tier label could not be parsed.
    InvalidTier(String),
    /// Wizard step is outside 1..=7.
    InvalidStep(u8),
    /// Order identifier could not be parsed.
    InvalidOrderId(String),
    /// Game is not in the catalog.
    UnknownGame(String),
    /// Environment is not in the catalog.
    UnknownEnvironment(String),
    /// Device package is not in the catalog.
    UnknownDevice(String),
    /// Add-on option is not in the catalog.
    UnknownOption(String),
    /// More games were selected than the current mode allows.
    TooManyGames {
        /// The number of games requested.
        requested: usize,
        /// The maximum allowed in the current mode.
        max: usize,
    },
    /// The same game was selected twice.
    DuplicateGame(String),
    /// An environment was chosen for a game that is not selected.
    GameNotSelected(String),
    /// The environment is not in the game's compatibility set.
    IncompatibleEnvironment {
        /// The game name.
        game: String,
        /// The rejected environment name.
        environment: String,
    },
    /// Total device quantity exceeds the cap.
    TooManyDevices {
        /// The requested total quantity.
        requested: u32,
        /// The maximum total quantity.
        max: u32,
    },
    /// Event day count is outside the allowed range.
    InvalidEventDays {
        /// The rejected value.
        days: u32,
    },
    /// Custom 3D model count is outside the allowed range.
    InvalidCustom3DCount {
        /// The rejected value.
        count: u32,
    },
    /// Both analytics options were selected at once.
    ConflictingAnalyticsOptions,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidCompany(msg) => write!(f, "Invalid company: {msg}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidTier(value) => write!(f, "Invalid pricing tier: '{value}'"),
            Self::InvalidStep(step) => {
                write!(f, "Invalid wizard step: {step}. Must be between 1 and 7")
            }
            Self::InvalidOrderId(value) => write!(f, "Invalid order id: '{value}'"),
            Self::UnknownGame(name) => write!(f, "Unknown game: '{name}'"),
            Self::UnknownEnvironment(name) => write!(f, "Unknown environment: '{name}'"),
            Self::UnknownDevice(name) => write!(f, "Unknown device package: '{name}'"),
            Self::UnknownOption(name) => write!(f, "Unknown option: '{name}'"),
            Self::TooManyGames { requested, max } => {
                write!(
                    f,
                    "Cannot select {requested} games: at most {max} allowed in the current mode"
                )
            }
            Self::DuplicateGame(name) => write!(f, "Game '{name}' is selected more than once"),
            Self::GameNotSelected(name) => write!(f, "Game '{name}' is not selected"),
            Self::IncompatibleEnvironment { game, environment } => {
                write!(
                    f,
                    "Environment '{environment}' is not compatible with game '{game}'"
                )
            }
            Self::TooManyDevices { requested, max } => {
                write!(
                    f,
                    "Cannot rent {requested} devices: at most {max} devices per order"
                )
            }
            Self::InvalidEventDays { days } => {
                write!(f, "Invalid event days: {days}. Must be between 1 and 30")
            }
            Self::InvalidCustom3DCount { count } => {
                write!(
                    f,
                    "Invalid custom 3D model count: {count}. Must be between 0 and 10"
                )
            }
            Self::ConflictingAnalyticsOptions => {
                write!(
                    f,
                    "Analytics Basic and Analytics Advanced cannot be selected together"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
