// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors raised by the order store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// Diesel reported an error while running a statement.
    DatabaseError(String),
    /// The database could not be opened.
    DatabaseConnectionFailed(String),
    /// Embedded migrations could not be applied.
    MigrationFailed(String),
    /// A raw statement (PRAGMA) failed.
    QueryFailed(String),
    /// No order row has this id.
    OrderNotFound(String),
    /// A stored row holds a value the domain rejects, such as a step
    /// outside 1..=7 or a negative quantity.
    ReconstructionError(String),
    /// The store could not be set up.
    InitializationError(String),
    /// `PRAGMA foreign_keys` is off, so cascading deletes would not run.
    ForeignKeyEnforcementNotEnabled,
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Could not open order store: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Statement failed: {msg}"),
            Self::OrderNotFound(id) => write!(f, "Order not found: {id}"),
            Self::ReconstructionError(msg) => write!(f, "Stored order is invalid: {msg}"),
            Self::InitializationError(msg) => write!(f, "Order store setup failed: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}
