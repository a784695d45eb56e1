// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order store for the VR event configurator.
//!
//! Orders and their selections are kept in `SQLite` through Diesel. Each
//! selection category lives in its own child table and is always saved as
//! a full replacement set. Every save bumps the order's revision, and
//! engine results are only recorded against the revision they were
//! computed from.
//!
//! ## Databases
//!
//! - File databases run in WAL mode
//! - In-memory databases get a unique shared-cache name per instance, so
//!   tests are isolated from each other
//!
//! Migrations are embedded and applied on open. Foreign key enforcement is
//! verified at startup.

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

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use vr_config::{OrderState, PricingResult, SelectionSet};
use vr_config_domain::OrderId;

// Linked for its bundled SQLite build.
use libsqlite3_sys as _;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{OrderRecord, OrderUpdate};
pub use error::PersistenceError;

/// Persistence adapter for orders and their selections.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_order_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Creates a new order at step 1 with no selections, Bronze at the
    /// Bronze base price.
    ///
    /// # Errors
    ///
    /// Returns an error if the order cannot be inserted.
    pub fn create_order(&mut self) -> Result<OrderState, PersistenceError> {
        let order: OrderState = OrderState::new(OrderId::new(), OffsetDateTime::now_utc());
        mutations::orders::create_order(&mut self.conn, &order)?;
        Ok(order)
    }

    /// Retrieves the order row without its selections.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if the
    /// order does not exist.
    pub fn get_order(&mut self, order_id: &OrderId) -> Result<Option<OrderRecord>, PersistenceError> {
        queries::orders::get_order(&mut self.conn, order_id)
    }

    /// Loads the complete order with every selection category.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::OrderNotFound` if the order does not exist.
    pub fn get_complete_order(&mut self, order_id: &OrderId) -> Result<OrderState, PersistenceError> {
        queries::orders::get_complete_order(&mut self.conn, order_id)
    }

    /// Replaces one selection category and bumps the order revision.
    ///
    /// # Returns
    ///
    /// The order's new revision.
    ///
    /// # Errors
    ///
    /// Returns an error if the order does not exist or the write fails.
    pub fn save_selections(
        &mut self,
        order_id: &OrderId,
        set: &SelectionSet,
    ) -> Result<i64, PersistenceError> {
        mutations::selections::save_selections(
            &mut self.conn,
            order_id,
            set,
            OffsetDateTime::now_utc(),
        )
    }

    /// Updates order-level fields (current step, completion).
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::OrderNotFound` if the order does not exist.
    pub fn update_order(
        &mut self,
        order_id: &OrderId,
        update: &OrderUpdate,
    ) -> Result<(), PersistenceError> {
        mutations::orders::update_order(&mut self.conn, order_id, update, OffsetDateTime::now_utc())
    }

    /// Records an engine result if the order is still at the revision it
    /// was computed from.
    ///
    /// # Returns
    ///
    /// `true` if written, `false` if the result was stale.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn record_pricing(
        &mut self,
        order_id: &OrderId,
        computed_at_revision: i64,
        pricing: &PricingResult,
    ) -> Result<bool, PersistenceError> {
        mutations::orders::record_pricing(&mut self.conn, order_id, computed_at_revision, pricing)
    }
}
