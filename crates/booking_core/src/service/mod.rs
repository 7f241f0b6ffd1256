//! Mutation use-cases: create, full-replace update and delete.
//!
//! # Responsibility
//! - Validate typed inputs, apply them inside one write session, commit.
//! - Turn any failure into a [`PersistError`] after the session rolled back.
//! - Produce the user-visible notice for both outcomes.
//!
//! # Invariants
//! - `received -> validated -> applied -> committed`, or
//!   `... -> failed -> rolled back`. Nothing is written on the failure path.
//! - The session is closed before a mutation function returns.
//! - Notices never carry the underlying cause; it is logged instead.

use crate::context::RequestContext;
use crate::db::DbError;
use crate::model::validation::ValidationError;
use crate::model::EntityKind;
use crate::repo::RepoError;
use log::{error, info, warn};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub mod artist_service;
pub mod seed;
pub mod show_service;
pub mod venue_service;

/// Write operation family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    fn outcome_verb(self) -> &'static str {
        match self {
            Self::Create => "listed",
            Self::Update => "updated",
            Self::Delete => "deleted",
        }
    }
}

/// Why a mutation did not commit.
#[derive(Debug)]
pub enum PersistFailure {
    /// Input rejected before any write.
    Invalid(ValidationError),
    /// Target id does not exist.
    NotFound(i64),
    /// Delete refused because shows still reference the record.
    Restricted { show_count: i64 },
    /// Storage failure, constraint violations included.
    Repo(RepoError),
}

impl Display for PersistFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "invalid input: {err}"),
            Self::NotFound(id) => write!(f, "record {id} not found"),
            Self::Restricted { show_count } => {
                write!(f, "still referenced by {show_count} show(s)")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl From<RepoError> for PersistFailure {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { id, .. } => Self::NotFound(id),
            RepoError::Validation(err) => Self::Invalid(err),
            other => Self::Repo(other),
        }
    }
}

impl From<DbError> for PersistFailure {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

impl From<ValidationError> for PersistFailure {
    fn from(value: ValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// Failed mutation, already rolled back.
#[derive(Debug)]
pub struct PersistError {
    pub entity: EntityKind,
    pub operation: MutationKind,
    /// Display name of the record when known (e.g. the submitted name).
    pub subject: Option<String>,
    pub failure: PersistFailure,
}

impl PersistError {
    /// Generic user-facing failure text naming entity and operation.
    pub fn notice(&self) -> String {
        format!(
            "An error occurred. {} could not be {}.",
            describe(self.entity, self.subject.as_deref()),
            self.operation.outcome_verb()
        )
    }
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:?} failed: {}",
            self.entity, self.operation, self.failure
        )
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.failure {
            PersistFailure::Invalid(err) => Some(err),
            PersistFailure::Repo(err) => Some(err),
            PersistFailure::NotFound(_) | PersistFailure::Restricted { .. } => None,
        }
    }
}

/// User-facing success text, e.g. `Venue The Musical Hop was successfully listed!`.
pub fn success_notice(entity: EntityKind, operation: MutationKind, subject: Option<&str>) -> String {
    format!(
        "{} was successfully {}!",
        describe(entity, subject),
        operation.outcome_verb()
    )
}

fn describe(entity: EntityKind, subject: Option<&str>) -> String {
    match subject {
        Some(name) => format!("{} {name}", entity.label()),
        None => entity.label().to_string(),
    }
}

/// One in-flight mutation: carries labels for logging and error shaping.
pub(crate) struct Mutation {
    entity: EntityKind,
    operation: MutationKind,
    subject: Option<String>,
    started_at: Instant,
}

impl Mutation {
    pub(crate) fn new(entity: EntityKind, operation: MutationKind, subject: Option<String>) -> Self {
        Self {
            entity,
            operation,
            subject,
            started_at: Instant::now(),
        }
    }

    /// Gate for the `validated` step; nothing is opened on rejection.
    pub(crate) fn check(&self, validated: Result<(), ValidationError>) -> Result<(), PersistError> {
        validated.map_err(|err| {
            let failure = PersistFailure::Invalid(err);
            warn!(
                "event={} module=service status=rejected error={failure}",
                self.event()
            );
            self.fail(failure)
        })
    }

    /// Applies `apply` inside a fresh session and commits it.
    ///
    /// Any error, including a failed commit, drops the session uncommitted so
    /// the whole mutation is rolled back.
    pub(crate) fn run<T, F>(self, ctx: &mut RequestContext<'_>, apply: F) -> Result<T, PersistError>
    where
        F: FnOnce(&Connection) -> Result<T, PersistFailure>,
    {
        match apply_in_session(ctx, self.event(), apply) {
            Ok(value) => {
                info!(
                    "event={} module=service status=ok duration_ms={}",
                    self.event(),
                    self.started_at.elapsed().as_millis()
                );
                Ok(value)
            }
            Err(failure) => {
                error!(
                    "event={} module=service status=error duration_ms={} error={failure}",
                    self.event(),
                    self.started_at.elapsed().as_millis()
                );
                Err(self.fail(failure))
            }
        }
    }

    fn fail(&self, failure: PersistFailure) -> PersistError {
        PersistError {
            entity: self.entity,
            operation: self.operation,
            subject: self.subject.clone(),
            failure,
        }
    }

    fn event(&self) -> &'static str {
        match (self.entity, self.operation) {
            (EntityKind::Venue, MutationKind::Create) => "venue_create",
            (EntityKind::Venue, MutationKind::Update) => "venue_update",
            (EntityKind::Venue, MutationKind::Delete) => "venue_delete",
            (EntityKind::Artist, MutationKind::Create) => "artist_create",
            (EntityKind::Artist, MutationKind::Update) => "artist_update",
            (EntityKind::Artist, MutationKind::Delete) => "artist_delete",
            (EntityKind::Show, MutationKind::Create) => "show_create",
            (EntityKind::Show, MutationKind::Update) => "show_update",
            (EntityKind::Show, MutationKind::Delete) => "show_delete",
        }
    }
}

fn apply_in_session<T, F>(
    ctx: &mut RequestContext<'_>,
    event: &'static str,
    apply: F,
) -> Result<T, PersistFailure>
where
    F: FnOnce(&Connection) -> Result<T, PersistFailure>,
{
    let session = ctx.begin(event)?;
    let value = apply(session.conn())?;
    session.commit()?;
    Ok(value)
}
