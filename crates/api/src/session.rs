// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Explicit wizard session context.

use crate::error::{ApiError, translate_domain_error};
use std::str::FromStr;
use vr_config_domain::OrderId;

/// Identifies the order a caller is configuring.
///
/// Every order operation takes one of these; there is no ambient "current
/// order".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WizardSession {
    order_id: OrderId,
}

impl WizardSession {
    /// Creates a session for an existing order.
    #[must_use]
    pub const fn new(order_id: OrderId) -> Self {
        Self { order_id }
    }

    /// Parses a session from an order id string.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if the id is not a valid order id.
    pub fn parse(order_id: &str) -> Result<Self, ApiError> {
        OrderId::from_str(order_id)
            .map(Self::new)
            .map_err(translate_domain_error)
    }

    /// The order this session refers to.
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        &self.order_id
    }
}
