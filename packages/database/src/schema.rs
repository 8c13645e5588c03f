//! Idempotent schema creation.
//!
//! Every statement is `CREATE ... IF NOT EXISTS`, so this runs on every
//! startup without touching existing data.

use switchy_database::Database;

use crate::DbError;

/// Creates all tables and indexes if they don't already exist.
///
/// # Errors
///
/// Returns [`DbError`] if any DDL statement fails.
pub async fn ensure_schema(db: &dyn Database) -> Result<(), DbError> {
    db.exec_raw(
        "CREATE TABLE IF NOT EXISTS users (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            email         TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            name          TEXT NOT NULL,
            role          TEXT NOT NULL DEFAULT 'user',
            city          TEXT,
            created_at    TEXT NOT NULL
        )",
    )
    .await?;

    db.exec_raw(
        "CREATE TABLE IF NOT EXISTS cities (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT UNIQUE NOT NULL,
            lat        REAL NOT NULL,
            lng        REAL NOT NULL,
            zoom       INTEGER NOT NULL DEFAULT 12,
            is_active  INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        )",
    )
    .await?;

    db.exec_raw(
        "CREATE TABLE IF NOT EXISTS zone_types (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT UNIQUE NOT NULL,
            description TEXT,
            is_active   INTEGER NOT NULL DEFAULT 1,
            created_at  TEXT NOT NULL
        )",
    )
    .await?;

    db.exec_raw(
        "CREATE TABLE IF NOT EXISTS zone_statuses (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT UNIQUE NOT NULL,
            color      TEXT NOT NULL,
            icon       TEXT,
            priority   INTEGER NOT NULL DEFAULT 0,
            is_active  INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        )",
    )
    .await?;

    db.exec_raw(
        "CREATE TABLE IF NOT EXISTS problem_types (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT UNIQUE NOT NULL,
            description TEXT,
            is_active   INTEGER NOT NULL DEFAULT 1,
            created_at  TEXT NOT NULL
        )",
    )
    .await?;

    db.exec_raw(
        "CREATE TABLE IF NOT EXISTS zones (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            name             TEXT NOT NULL,
            city             TEXT NOT NULL,
            type             TEXT NOT NULL,
            status           TEXT NOT NULL,
            lat              REAL NOT NULL,
            lng              REAL NOT NULL,
            area             TEXT,
            description      TEXT,
            created_by       INTEGER NOT NULL REFERENCES users(id),
            is_approved      INTEGER NOT NULL DEFAULT 1,
            created_at       TEXT NOT NULL,
            last_maintenance TEXT
        )",
    )
    .await?;

    db.exec_raw(
        "CREATE TABLE IF NOT EXISTS zone_requests (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id          INTEGER NOT NULL REFERENCES users(id),
            name             TEXT NOT NULL,
            city             TEXT NOT NULL,
            type             TEXT NOT NULL,
            lat              REAL NOT NULL,
            lng              REAL NOT NULL,
            description      TEXT,
            status           TEXT NOT NULL DEFAULT 'pending',
            rejection_reason TEXT,
            created_at       TEXT NOT NULL
        )",
    )
    .await?;

    db.exec_raw(
        "CREATE TABLE IF NOT EXISTS problem_reports (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            zone_id      INTEGER NOT NULL REFERENCES zones(id),
            user_id      INTEGER NOT NULL REFERENCES users(id),
            problem_type TEXT NOT NULL,
            description  TEXT NOT NULL,
            status       TEXT NOT NULL DEFAULT 'new',
            created_at   TEXT NOT NULL,
            resolved_at  TEXT
        )",
    )
    .await?;

    db.exec_raw(
        "CREATE TABLE IF NOT EXISTS maintenance_logs (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            zone_id          INTEGER NOT NULL REFERENCES zones(id),
            user_id          INTEGER NOT NULL REFERENCES users(id),
            action_type      TEXT NOT NULL,
            description      TEXT NOT NULL,
            cost             REAL,
            duration_minutes INTEGER,
            performed_at     TEXT NOT NULL
        )",
    )
    .await?;

    db.exec_raw(
        "CREATE INDEX IF NOT EXISTS idx_zones_city_approved
         ON zones (city, is_approved)",
    )
    .await?;

    db.exec_raw(
        "CREATE INDEX IF NOT EXISTS idx_problem_reports_zone_status
         ON problem_reports (zone_id, status)",
    )
    .await?;

    db.exec_raw(
        "CREATE INDEX IF NOT EXISTS idx_maintenance_logs_zone
         ON maintenance_logs (zone_id, performed_at)",
    )
    .await?;

    db.exec_raw(
        "CREATE INDEX IF NOT EXISTS idx_zone_requests_status
         ON zone_requests (status, created_at)",
    )
    .await?;

    log::info!("Database schema ensured");

    Ok(())
}
