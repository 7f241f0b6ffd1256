//! Genre tags and their single-column storage encoding.
//!
//! Genres are stored as one text column holding the display labels joined
//! with `", "`. Splitting the stored text on the same separator must give the
//! same list back, order included.

use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Separator between genre labels in the stored column.
pub const GENRE_SEPARATOR: &str = ", ";

/// Fixed set of genre tags a venue or artist can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genre {
    Alternative,
    Blues,
    Classical,
    Country,
    Electronic,
    Folk,
    Funk,
    #[serde(rename = "Hip-Hop")]
    HipHop,
    #[serde(rename = "Heavy Metal")]
    HeavyMetal,
    Instrumental,
    Jazz,
    #[serde(rename = "Musical Theatre")]
    MusicalTheatre,
    Pop,
    Punk,
    #[serde(rename = "R&B")]
    RhythmAndBlues,
    Reggae,
    #[serde(rename = "Rock n Roll")]
    RockNRoll,
    Soul,
    Other,
}

impl Genre {
    /// Every genre in form display order.
    pub const ALL: [Genre; 19] = [
        Genre::Alternative,
        Genre::Blues,
        Genre::Classical,
        Genre::Country,
        Genre::Electronic,
        Genre::Folk,
        Genre::Funk,
        Genre::HipHop,
        Genre::HeavyMetal,
        Genre::Instrumental,
        Genre::Jazz,
        Genre::MusicalTheatre,
        Genre::Pop,
        Genre::Punk,
        Genre::RhythmAndBlues,
        Genre::Reggae,
        Genre::RockNRoll,
        Genre::Soul,
        Genre::Other,
    ];

    /// Display label, also the stored form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Alternative => "Alternative",
            Self::Blues => "Blues",
            Self::Classical => "Classical",
            Self::Country => "Country",
            Self::Electronic => "Electronic",
            Self::Folk => "Folk",
            Self::Funk => "Funk",
            Self::HipHop => "Hip-Hop",
            Self::HeavyMetal => "Heavy Metal",
            Self::Instrumental => "Instrumental",
            Self::Jazz => "Jazz",
            Self::MusicalTheatre => "Musical Theatre",
            Self::Pop => "Pop",
            Self::Punk => "Punk",
            Self::RhythmAndBlues => "R&B",
            Self::Reggae => "Reggae",
            Self::RockNRoll => "Rock n Roll",
            Self::Soul => "Soul",
            Self::Other => "Other",
        }
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Genre {
    type Err = ValidationError;

    /// Parses a display label. Matching ignores ASCII case and surrounding
    /// whitespace so hand-typed CLI values resolve too.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Genre::ALL
            .into_iter()
            .find(|genre| genre.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::UnknownGenre(value.to_string()))
    }
}

/// Encodes genres into the stored column value.
pub fn join_genres(genres: &[Genre]) -> String {
    genres
        .iter()
        .map(|genre| genre.label())
        .collect::<Vec<_>>()
        .join(GENRE_SEPARATOR)
}

/// Decodes the stored column value back into genres.
///
/// The empty string decodes to an empty list.
pub fn split_genres(value: &str) -> Result<Vec<Genre>, ValidationError> {
    if value.is_empty() {
        return Ok(Vec::new());
    }
    value.split(GENRE_SEPARATOR).map(Genre::from_str).collect()
}
