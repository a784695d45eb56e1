// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use vr_config_domain::{DomainError, WizardStep};

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The current step's gate does not allow moving forward.
    StepIncomplete {
        /// The step that blocked.
        step: WizardStep,
        /// What is missing.
        message: String,
    },
    /// The order is already on the review step.
    NoNextStep,
    /// The order is already on the first step.
    NoPreviousStep,
    /// A jump targeted a step the order has not reached yet.
    StepNotReached {
        /// The requested step.
        requested: WizardStep,
        /// The order's current step.
        current: WizardStep,
    },
    /// The order has been submitted and no longer accepts changes.
    OrderCompleted,
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::StepIncomplete { step, message } => {
                write!(f, "Step {step} is incomplete: {message}")
            }
            Self::NoNextStep => write!(f, "Already on the last step"),
            Self::NoPreviousStep => write!(f, "Already on the first step"),
            Self::StepNotReached { requested, current } => {
                write!(
                    f,
                    "Cannot jump to step {requested}: the order is on step {current}"
                )
            }
            Self::OrderCompleted => write!(f, "Order has already been submitted"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
