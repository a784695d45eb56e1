// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the VR event configurator.
//!
//! This crate ties the pure engine to the order store: it runs commands
//! against stored orders, keeps cached pricing in step with the engine,
//! and turns finished orders into submissions for the intake endpoint.

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
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod recalculate;
mod request_response;
mod session;
mod submission;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    execute_command, finish_order, list_catalog, quote, resume_order, start_order, step_status,
};
pub use recalculate::{Recalculation, recalculate_pricing};
pub use request_response::{
    CatalogDevice, CatalogEnvironment, CatalogGame, CatalogOption, CatalogResponse, CatalogTier,
    CommandResponse, DeviceQuantity, FinishResponse, FinishedOrder, NavigateRequest, OrderView,
    PricingView, QuoteResponse, ReplaceOptionsRequest, SaveUserDetailsRequest,
    SelectEnvironmentRequest, SelectGamesRequest, SetCustom3DRequest, SetDevicesRequest,
    StepStatusResponse, ToggleOptionRequest,
};
pub use session::WizardSession;
pub use submission::{
    DEFAULT_REQUEST_TIMEOUT, IntakeClient, RETRY_DELAYS_SECS, SubmissionError, SubmissionOutcome,
    SubmissionRecord, SubmittedDevice, SubmittedEnvironment, SubmittedGame, SubmittedOption,
    deliver_submission, format_plain_text_summary, format_usd,
};
