//! Brewery store bootstrap.
//!
//! # Responsibility
//! - Hand callers (CLI, tests) a connection to a migrated brewery store.
//! - Classify store failures for the repository layer.
//!
//! # Invariants
//! - Repositories only borrow a connection; the caller owns its lifetime.
//! - Returned connections enforce the `beer_image` -> `brewery` foreign key.
//! - Schema version is tracked via `PRAGMA user_version`.

use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

/// Store file used when the caller names none.
pub const DEFAULT_DB_FILE: &str = "brewfinder.sqlite3";

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// The store file could not be opened or created.
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },
    Sqlite(rusqlite::Error),
    /// `PRAGMA foreign_keys` did not read back as enabled.
    ForeignKeysUnavailable,
    /// The file was migrated by a newer build.
    SchemaTooNew { found: u32, supported: u32 },
}

impl DbError {
    /// True when SQLite rejected a write on a foreign key, unique token or check.
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            Self::Sqlite(rusqlite::Error::SqliteFailure(err, _)) => {
                err.code == ErrorCode::ConstraintViolation
            }
            _ => false,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "cannot open brewery store `{}`: {source}", path.display())
            }
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::ForeignKeysUnavailable => {
                write!(f, "brewery store connection does not enforce foreign keys")
            }
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "brewery store schema version {found} is newer than supported {supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::ForeignKeysUnavailable | Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;
    use rusqlite::ffi;

    #[test]
    fn only_constraint_failures_are_classified_as_violations() {
        let unique = DbError::Sqlite(rusqlite::Error::SqliteFailure(
            ffi::Error::new(ffi::SQLITE_CONSTRAINT_UNIQUE),
            None,
        ));
        assert!(unique.is_constraint_violation());

        let busy = DbError::Sqlite(rusqlite::Error::SqliteFailure(
            ffi::Error::new(ffi::SQLITE_BUSY),
            None,
        ));
        assert!(!busy.is_constraint_violation());
        assert!(!DbError::ForeignKeysUnavailable.is_constraint_violation());
    }

    #[test]
    fn schema_error_names_both_versions() {
        let err = DbError::SchemaTooNew {
            found: 9,
            supported: 3,
        };
        assert_eq!(
            err.to_string(),
            "brewery store schema version 9 is newer than supported 3"
        );
    }
}
