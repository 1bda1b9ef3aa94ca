//! SQLite storage bootstrap for the events schema.
//!
//! # Responsibility
//! - Open and configure SQLite connections.
//! - Apply schema migrations, then check every table the repositories use.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - A connection is only handed out once [`SCHEMA_TABLES`] all exist.

use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

/// Tables read or written by the repository layer.
pub const SCHEMA_TABLES: &[&str] = &[
    "participants",
    "events",
    "logistics",
    "event_logistics",
    "event_participants",
];

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Database was written by a newer binary.
    UnsupportedSchemaVersion { db_version: u32, latest_supported: u32 },
    /// `user_version` claims the schema is current but a table is absent.
    MissingTable { table: &'static str, db_version: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "events schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::MissingTable { table, db_version } => write!(
                f,
                "events schema version {db_version} is missing table `{table}`"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Fails with `MissingTable` on the first absent entry of [`SCHEMA_TABLES`].
pub fn verify_schema(conn: &Connection) -> DbResult<()> {
    let mut stmt = conn.prepare(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
    )?;
    for &table in SCHEMA_TABLES {
        let exists: bool = stmt.query_row([table], |row| row.get(0))?;
        if !exists {
            let db_version = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
            return Err(DbError::MissingTable { table, db_version });
        }
    }
    Ok(())
}
