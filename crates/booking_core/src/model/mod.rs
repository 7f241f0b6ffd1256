//! Directory domain model.
//!
//! # Responsibility
//! - Define the venue, artist and show records plus their typed inputs.
//! - Own the genre encoding and input validation rules.
//!
//! # Invariants
//! - Ids are assigned by the database and never reused.
//! - `seeking_description` is present iff the owner's seeking flag is set.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub mod artist;
pub mod genre;
pub mod show;
pub mod validation;
pub mod venue;

/// Entity family used for error reporting, notices and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Venue,
    Artist,
    Show,
}

impl EntityKind {
    /// Human label used in user-visible notices.
    pub fn label(self) -> &'static str {
        match self {
            Self::Venue => "Venue",
            Self::Artist => "Artist",
            Self::Show => "Show",
        }
    }

    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            Self::Venue => "venue",
            Self::Artist => "artist",
            Self::Show => "show",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}
