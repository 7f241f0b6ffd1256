//! Show record, start-time encoding and past/upcoming classification.
//!
//! # Invariants
//! - `start_time` is stored as `YYYY-MM-DD HH:MM:SS` text, so lexical order
//!   equals chronological order. Years outside 0..=9999 would break that
//!   (chrono writes them with a sign) and are rejected on input.
//! - Past/upcoming is derived against a caller-supplied instant and never
//!   stored. A show starting exactly at that instant is in neither bucket.

use crate::model::artist::ArtistId;
use crate::model::validation::{validate_reference, ValidationError};
use crate::model::venue::VenueId;
use chrono::{DateTime, Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::RangeInclusive;

/// Years whose `%Y` rendering is exactly four digits.
const STORABLE_YEARS: RangeInclusive<i32> = 0..=9999;

/// Storage and listing format for show start times.
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ACCEPTED_INPUT_FORMATS: [&str; 4] = [
    START_TIME_FORMAT,
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Database-assigned show identifier.
pub type ShowId = i64;

/// One artist booked at one venue at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    pub id: ShowId,
    pub venue_id: VenueId,
    pub artist_id: ArtistId,
    pub start_time: NaiveDateTime,
}

/// Shaped show form values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowInput {
    pub venue_id: VenueId,
    pub artist_id: ArtistId,
    pub start_time: NaiveDateTime,
}

impl ShowInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_reference("venue_id", self.venue_id)?;
        validate_reference("artist_id", self.artist_id)?;
        validate_start_year(self.start_time)
    }

    pub fn into_show(self, id: ShowId) -> Show {
        Show {
            id,
            venue_id: self.venue_id,
            artist_id: self.artist_id,
            start_time: truncate_to_seconds(self.start_time),
        }
    }
}

impl From<Show> for ShowInput {
    fn from(show: Show) -> Self {
        Self {
            venue_id: show.venue_id,
            artist_id: show.artist_id,
            start_time: show.start_time,
        }
    }
}

/// Which side of the evaluation instant a show falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBucket {
    Past,
    Upcoming,
}

impl TimeBucket {
    /// Classifies `start_time` against `now`; equal instants yield `None`.
    pub fn classify(start_time: NaiveDateTime, now: NaiveDateTime) -> Option<Self> {
        match start_time.cmp(&now) {
            Ordering::Less => Some(Self::Past),
            Ordering::Greater => Some(Self::Upcoming),
            Ordering::Equal => None,
        }
    }
}

/// Presentation styles for start times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `Tuesday May, 21, 2019 at 9:30PM`
    Full,
    /// `Tue 05, 21, 2019 9:30PM`
    Medium,
}

/// Formats a start time for display.
pub fn format_start_time(value: NaiveDateTime, format: DateFormat) -> String {
    let pattern = match format {
        DateFormat::Full => "%A %B, %-d, %Y at %-I:%M%p",
        DateFormat::Medium => "%a %m, %d, %Y %-I:%M%p",
    };
    value.format(pattern).to_string()
}

/// Parses submitted start-time text.
///
/// Accepts `YYYY-MM-DD HH:MM[:SS]`, the `T`-separated variants, and RFC 3339
/// (the wall-clock time in the given offset is kept).
pub fn parse_start_time(value: &str) -> Result<NaiveDateTime, ValidationError> {
    let trimmed = value.trim();
    for format in ACCEPTED_INPUT_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(truncate_to_seconds(parsed));
        }
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|parsed| truncate_to_seconds(parsed.naive_local()))
        .map_err(|_| ValidationError::InvalidStartTime(value.to_string()))
}

fn validate_start_year(value: NaiveDateTime) -> Result<(), ValidationError> {
    if STORABLE_YEARS.contains(&value.year()) {
        return Ok(());
    }
    Err(ValidationError::InvalidStartTime(value.to_string()))
}

/// Encodes a start time for storage and comparison.
pub fn start_time_to_db(value: NaiveDateTime) -> String {
    value.format(START_TIME_FORMAT).to_string()
}

/// Decodes a stored start time.
pub fn start_time_from_db(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, START_TIME_FORMAT).ok()
}

pub(crate) fn truncate_to_seconds(value: NaiveDateTime) -> NaiveDateTime {
    value.with_nanosecond(0).unwrap_or(value)
}
