//! Read-only views over the directory.
//!
//! # Responsibility
//! - Grouped venue browsing with upcoming show counts.
//! - Case-insensitive name search for venues and artists.
//! - Detail views with past/upcoming show splits and the show listing.
//!
//! # Invariants
//! - Every time comparison uses the evaluation instant of the
//!   [`RequestContext`](crate::context::RequestContext), never a fresh clock.
//! - Missing records are `Ok(None)`, not errors.
//! - Failures propagate unchanged as [`RepoError`](crate::repo::RepoError).

use crate::model::show::{start_time_from_db, TimeBucket};
use crate::model::EntityKind;
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDateTime;
use log::debug;
use rusqlite::Connection;
use serde::Serialize;

pub mod artist_query;
pub mod show_query;
pub mod venue_query;

/// Minimal `{id, name}` projection used by listings and search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedRecord {
    pub id: i64,
    pub name: String,
}

/// Search response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<NamedRecord>,
}

/// Returns whether `name` contains `term`, ignoring case.
///
/// Lowercasing uses Unicode rules with no locale tailoring. The empty term
/// matches every name.
pub fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

pub(crate) fn list_named(conn: &Connection, entity: EntityKind) -> RepoResult<Vec<NamedRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, name FROM {} ORDER BY id ASC;",
        entity.table()
    ))?;
    let mut rows = stmt.query([])?;
    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        records.push(NamedRecord {
            id: row.get("id")?,
            name: row.get("name")?,
        });
    }
    Ok(records)
}

pub(crate) fn search_by_name(
    conn: &Connection,
    entity: EntityKind,
    term: &str,
) -> RepoResult<SearchResults> {
    let data: Vec<NamedRecord> = list_named(conn, entity)?
        .into_iter()
        .filter(|record| name_matches(&record.name, term))
        .collect();
    debug!(
        "event=search module=query status=ok entity={entity} term_chars={} hits={}",
        term.chars().count(),
        data.len()
    );
    Ok(SearchResults {
        count: data.len(),
        data,
    })
}

/// Splits timed rows into `(past, upcoming)` against `now`, keeping order.
/// Rows starting exactly at `now` are dropped.
pub(crate) fn partition_by_start<T>(
    rows: Vec<(NaiveDateTime, T)>,
    now: NaiveDateTime,
) -> (Vec<T>, Vec<T>) {
    let mut past = Vec::new();
    let mut upcoming = Vec::new();
    for (start_time, row) in rows {
        match TimeBucket::classify(start_time, now) {
            Some(TimeBucket::Past) => past.push(row),
            Some(TimeBucket::Upcoming) => upcoming.push(row),
            None => {}
        }
    }
    (past, upcoming)
}

pub(crate) fn parse_start_column(value: &str) -> RepoResult<NaiveDateTime> {
    start_time_from_db(value).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid timestamp `{value}` in show.start_time"))
    })
}
