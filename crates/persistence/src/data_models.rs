// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PersistenceError;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use vr_config::CachedPricing;
use vr_config_domain::{OrderId, WizardStep};

/// The order row on its own, without any selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub order_id: OrderId,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub step: WizardStep,
    pub multi_game: bool,
    pub event_days: u32,
    pub pricing: CachedPricing,
    pub revision: i64,
    pub completed_at: Option<OffsetDateTime>,
}

/// Order-level fields that can change outside a selection save.
///
/// `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderUpdate {
    pub step: Option<WizardStep>,
    pub completed_at: Option<OffsetDateTime>,
}

/// Formats a timestamp for a `TEXT` column.
pub(crate) fn format_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::DatabaseError(format!("Failed to format timestamp: {e}")))
}

/// Parses a timestamp written by [`format_timestamp`].
pub(crate) fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| {
        PersistenceError::ReconstructionError(format!("Invalid timestamp '{value}': {e}"))
    })
}
