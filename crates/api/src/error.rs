// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use vr_config::CoreError;
use vr_config_domain::DomainError;
use vr_config_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidName(_) => ApiError::InvalidInput {
            field: String::from("name"),
            message,
        },
        DomainError::InvalidCompany(_) => ApiError::InvalidInput {
            field: String::from("company"),
            message,
        },
        DomainError::InvalidEmail(_) => ApiError::InvalidInput {
            field: String::from("email"),
            message,
        },
        DomainError::InvalidTier(_) => ApiError::InvalidInput {
            field: String::from("tier"),
            message,
        },
        DomainError::InvalidStep(_) => ApiError::InvalidInput {
            field: String::from("step"),
            message,
        },
        DomainError::InvalidOrderId(_) => ApiError::InvalidInput {
            field: String::from("order_id"),
            message,
        },
        DomainError::InvalidEventDays { .. } => ApiError::InvalidInput {
            field: String::from("event_days"),
            message,
        },
        DomainError::InvalidCustom3DCount { .. } => ApiError::InvalidInput {
            field: String::from("count"),
            message,
        },
        DomainError::UnknownGame(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Game"),
            message,
        },
        DomainError::UnknownEnvironment(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Environment"),
            message,
        },
        DomainError::UnknownDevice(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Device"),
            message,
        },
        DomainError::UnknownOption(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Option"),
            message,
        },
        DomainError::TooManyGames { .. } => ApiError::DomainRuleViolation {
            rule: String::from("max_games"),
            message,
        },
        DomainError::DuplicateGame(_) => ApiError::DomainRuleViolation {
            rule: String::from("unique_games"),
            message,
        },
        DomainError::GameNotSelected(_) => ApiError::DomainRuleViolation {
            rule: String::from("game_selected"),
            message,
        },
        DomainError::IncompatibleEnvironment { .. } => ApiError::DomainRuleViolation {
            rule: String::from("environment_compatibility"),
            message,
        },
        DomainError::TooManyDevices { .. } => ApiError::DomainRuleViolation {
            rule: String::from("max_devices"),
            message,
        },
        DomainError::ConflictingAnalyticsOptions => ApiError::DomainRuleViolation {
            rule: String::from("exclusive_analytics"),
            message,
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::StepIncomplete { step, message } => ApiError::DomainRuleViolation {
            rule: String::from("step_incomplete"),
            message: format!("Step {step} is incomplete: {message}"),
        },
        CoreError::NoNextStep | CoreError::NoPreviousStep | CoreError::StepNotReached { .. } => {
            ApiError::DomainRuleViolation {
                rule: String::from("navigation"),
                message: err.to_string(),
            }
        }
        CoreError::OrderCompleted => ApiError::DomainRuleViolation {
            rule: String::from("order_completed"),
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Only a missing order is meaningful to callers; everything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::OrderNotFound(order_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Order"),
            message: format!("Order '{order_id}' does not exist"),
        },
        _ => ApiError::Internal {
            message: err.to_string(),
        },
    }
}
