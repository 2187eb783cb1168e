//! Repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Run parameterized SQL for entity CRUD and finder queries.
//! - Map rows back into validated entities through one shared helper.
//!
//! # Invariants
//! - Finder keys and entity state are checked before any SQL is issued.
//! - A stored row that fails entity validation or holds a mistyped column
//!   surfaces as `RepoError::InvalidData`, never as `RepoError::Validation`
//!   or `RepoError::Db`.

use crate::db::DbError;
use crate::model::validate::ValidationError;
use rusqlite::types::FromSql;
use rusqlite::{Connection, Params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod beer_image_repo;
pub mod brewery_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Coarse classification of [`RepoError`] for callers that only need to
/// tell bad input from missing rows from store failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    DataAccess,
}

/// Repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Caller passed an invalid finder key.
    Validation(ValidationError),
    /// Update/delete matched no row.
    NotFound { entity: &'static str, id: i64 },
    /// Insert called on an entity that already carries an identifier.
    AlreadyPersisted { entity: &'static str, id: i64 },
    /// Update/delete called on an entity without an identifier.
    NotPersisted { entity: &'static str },
    Db(DbError),
    /// Stored row cannot be turned into an entity.
    InvalidData {
        table: &'static str,
        defect: RowDefect,
    },
}

/// Why a stored row could not be converted.
#[derive(Debug)]
pub enum RowDefect {
    /// A value decoded but breaks a field rule.
    Field(ValidationError),
    /// A column holds a value of the wrong SQL type or range.
    Column(rusqlite::Error),
}

impl Display for RowDefect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Field(err) => write!(f, "{err}"),
            Self::Column(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RowDefect {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field(err) => Some(err),
            Self::Column(err) => Some(err),
        }
    }
}

impl RepoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyPersisted { .. }
            | Self::NotPersisted { .. }
            | Self::Db(_)
            | Self::InvalidData { .. } => ErrorKind::DataAccess,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::AlreadyPersisted { entity, id } => {
                write!(f, "{entity} already exists with id {id}")
            }
            Self::NotPersisted { entity } => {
                write!(f, "{entity} has not been inserted yet")
            }
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData { table, defect } => {
                write!(f, "invalid persisted row in {table}: {defect}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData { defect, .. } => Some(defect),
            Self::NotFound { .. } | Self::AlreadyPersisted { .. } | Self::NotPersisted { .. } => {
                None
            }
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Reads one column, reporting type and range mismatches as `InvalidData`.
pub(crate) fn column<T: FromSql>(row: &Row<'_>, table: &'static str, name: &str) -> RepoResult<T> {
    row.get(name).map_err(|err| match err {
        rusqlite::Error::InvalidColumnType(..)
        | rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::IntegralValueOutOfRange(..) => RepoError::InvalidData {
            table,
            defect: RowDefect::Column(err),
        },
        other => RepoError::from(other),
    })
}

/// Converts an entity validation failure on a stored row.
pub(crate) fn invalid_row(table: &'static str) -> impl Fn(ValidationError) -> RepoError {
    move |err| RepoError::InvalidData {
        table,
        defect: RowDefect::Field(err),
    }
}

/// Runs `sql` and maps every row through `parse`, preserving row order.
pub(crate) fn query_all<T, P, F>(
    conn: &Connection,
    sql: &str,
    params: P,
    parse: F,
) -> RepoResult<Vec<T>>
where
    P: Params,
    F: Fn(&Row<'_>) -> RepoResult<T>,
{
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut items = Vec::new();

    while let Some(row) = rows.next()? {
        items.push(parse(row)?);
    }

    Ok(items)
}

/// Runs `sql` and maps the first row, if any.
pub(crate) fn query_one<T, P, F>(
    conn: &Connection,
    sql: &str,
    params: P,
    parse: F,
) -> RepoResult<Option<T>>
where
    P: Params,
    F: Fn(&Row<'_>) -> RepoResult<T>,
{
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;

    match rows.next()? {
        Some(row) => Ok(Some(parse(row)?)),
        None => Ok(None),
    }
}

/// Wraps `needle` as a `LIKE ... ESCAPE '\'` substring pattern.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
