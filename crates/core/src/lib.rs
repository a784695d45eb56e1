// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod gate;
mod pricing;
mod snapshot;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::apply;
pub use command::Command;
pub use error::CoreError;
pub use gate::{CUSTOM_3D_COUNT_WARNING, StepValidation, evaluate_step};
pub use pricing::{
    GOLD_CUSTOM_3D_THRESHOLD, GOLD_DEVICE_THRESHOLD, PricingResult, SILVER_DEVICE_COUNT,
    TierClassification, TierReason, calculate_pricing, classify_tier, device_price,
};
pub use snapshot::OrderSnapshot;
pub use state::{
    CachedPricing, OrderState, SelectionCategory, SelectionSet, TierChange, TransitionResult,
};
