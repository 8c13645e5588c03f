#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Database connection, schema, seeding, and queries for ecopulse.
//!
//! The store is a single `SQLite` database accessed through
//! `switchy_database`. Schema creation is idempotent (`CREATE TABLE IF NOT
//! EXISTS`) and runs at startup, followed by reference-data seeding so a
//! fresh deployment comes up with the city/type/status dictionaries and a
//! super-admin account already in place.

pub mod db;
pub mod queries;
pub mod schema;
pub mod seed;

/// Errors that can occur during database operations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Database query error.
    #[error("Database error: {0}")]
    Database(#[from] switchy_database::DatabaseError),

    /// Failed to open the `SQLite` database file.
    #[error("Database connect error: {0}")]
    Connect(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Data conversion error.
    #[error("Data conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}
