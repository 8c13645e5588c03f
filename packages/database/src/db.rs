//! Database connection utilities.

use std::path::Path;

use switchy_database::Database;
use switchy_database_connection::init_sqlite_rusqlite;

use crate::DbError;

/// Default path for the ecopulse database.
pub const DEFAULT_DB_PATH: &str = "data/ecopulse.db";

/// Opens (or creates) the `SQLite` database at `path`.
///
/// Creates the parent directory if needed and turns on foreign key
/// enforcement (`SQLite` has it off by default).
///
/// # Errors
///
/// Returns [`DbError`] if the parent directory cannot be created or the
/// database cannot be opened.
pub async fn open_db(path: &Path) -> Result<Box<dyn Database>, DbError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db = init_sqlite_rusqlite(Some(path)).map_err(|e| DbError::Connect(e.to_string()))?;

    db.exec_raw("PRAGMA foreign_keys = ON").await?;

    Ok(db)
}

/// Opens the database at the path from the `DATABASE_PATH` environment
/// variable, falling back to [`DEFAULT_DB_PATH`].
///
/// # Errors
///
/// Returns [`DbError`] if the database cannot be opened.
pub async fn connect_from_env() -> Result<Box<dyn Database>, DbError> {
    let path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
    open_db(Path::new(&path)).await
}
