// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order mutations.
//!
//! - `orders` - order row lifecycle (`create_order`, `update_order`, `record_pricing`)
//! - `selections` - full replacement saves of one selection category
//!
//! All mutations use Diesel DSL.

pub mod orders;
pub mod selections;

use num_traits::ToPrimitive;

use crate::error::PersistenceError;

/// Converts an unsigned count to an `INTEGER` column value.
pub(crate) fn to_column_i32(value: u32, column: &str) -> Result<i32, PersistenceError> {
    value.to_i32().ok_or_else(|| {
        PersistenceError::DatabaseError(format!("Value {value} out of range for {column}"))
    })
}

/// Converts an unsigned amount to a `BIGINT` column value.
pub(crate) fn to_column_i64(value: u64, column: &str) -> Result<i64, PersistenceError> {
    value.to_i64().ok_or_else(|| {
        PersistenceError::DatabaseError(format!("Value {value} out of range for {column}"))
    })
}
