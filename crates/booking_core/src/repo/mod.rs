//! Repository layer: point CRUD over the `venue`, `artist` and `show` tables.
//!
//! # Responsibility
//! - Keep SQL for inserts, full-replace updates, deletes and id lookups in
//!   one place per entity.
//! - Decode stored rows into domain records.
//!
//! # Invariants
//! - Write paths validate their input before issuing SQL.
//! - Read paths reject corrupt persisted state instead of masking it.
//! - Update/delete of a missing id is `RepoError::NotFound`.

use crate::db::DbError;
use crate::model::genre::{split_genres, Genre};
use crate::model::validation::ValidationError;
use crate::model::EntityKind;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod artist_repo;
pub mod show_repo;
pub mod venue_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by every entity repository and read query.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound { entity: EntityKind, id: i64 },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) => None,
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

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn int_to_bool(column: &str, value: i64) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}

pub(crate) fn decode_genres(column: &str, value: &str) -> RepoResult<Vec<Genre>> {
    split_genres(value)
        .map_err(|err| RepoError::InvalidData(format!("{err} in {column}")))
}

pub(crate) fn ensure_changed(changed: usize, entity: EntityKind, id: i64) -> RepoResult<()> {
    if changed == 0 {
        return Err(RepoError::NotFound { entity, id });
    }
    Ok(())
}
