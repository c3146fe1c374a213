//! SQLite bootstrap for the durable namespace store.
//!
//! # Responsibility
//! - Open file-backed or in-memory SQLite connections.
//! - Bring the schema to the latest known version before use.
//! - Confirm the `namespaces` key-value table is present afterwards.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - A database written by a newer binary is rejected, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Storage bootstrap or namespace query failure.
#[derive(Debug)]
pub enum DbError {
    /// Namespace read or write failed.
    Sqlite(rusqlite::Error),
    /// One migration step failed; the whole batch was rolled back.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// Schema version claims the table exists but it does not.
    NamespaceTableMissing { schema_version: u32 },
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl DbError {
    /// Stable code used in `error_code=` log fields.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "db_query_failed",
            Self::Migration { .. } => "db_migration_failed",
            Self::NamespaceTableMissing { .. } => "db_namespace_table_missing",
            Self::UnsupportedSchemaVersion { .. } => "db_version_unsupported",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "namespace store query failed: {err}"),
            Self::Migration { version, source } => {
                write!(f, "migration {version} failed: {source}")
            }
            Self::NamespaceTableMissing { schema_version } => write!(
                f,
                "namespaces table missing at schema version {schema_version}"
            ),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::NamespaceTableMissing { .. } | Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
