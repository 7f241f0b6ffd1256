//! Venue repository contract and SQLite implementation.

use crate::model::genre::join_genres;
use crate::model::venue::{Venue, VenueId, VenueInput};
use crate::model::EntityKind;
use crate::repo::{bool_to_int, decode_genres, ensure_changed, int_to_bool, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const VENUE_SELECT_SQL: &str = "SELECT
    id,
    name,
    city,
    state,
    address,
    phone,
    genres,
    facebook_link,
    image_link,
    website_link,
    seeking_talent,
    seeking_description
FROM venue";

/// Repository interface for venue point operations.
pub trait VenueRepository {
    fn insert_venue(&self, input: &VenueInput) -> RepoResult<VenueId>;
    /// Overwrites every mutable column of an existing venue.
    fn update_venue(&self, id: VenueId, input: &VenueInput) -> RepoResult<()>;
    fn delete_venue(&self, id: VenueId) -> RepoResult<()>;
    fn get_venue(&self, id: VenueId) -> RepoResult<Option<Venue>>;
    /// Reads only the name column, so rows with undecodable fields still resolve.
    fn venue_name(&self, id: VenueId) -> RepoResult<Option<String>>;
    /// Counts shows of any time that reference this venue.
    fn count_venue_shows(&self, id: VenueId) -> RepoResult<i64>;
}

/// SQLite-backed venue repository.
pub struct SqliteVenueRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteVenueRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl VenueRepository for SqliteVenueRepository<'_> {
    fn insert_venue(&self, input: &VenueInput) -> RepoResult<VenueId> {
        input.validate()?;

        self.conn.execute(
            "INSERT INTO venue (
                name,
                city,
                state,
                address,
                phone,
                genres,
                facebook_link,
                image_link,
                website_link,
                seeking_talent,
                seeking_description
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
            params![
                input.name,
                input.city,
                input.state,
                input.address,
                input.phone,
                join_genres(&input.genres),
                input.facebook_link,
                input.image_link,
                input.website_link,
                bool_to_int(input.seeking_talent),
                input.seeking_description,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_venue(&self, id: VenueId, input: &VenueInput) -> RepoResult<()> {
        input.validate()?;

        let changed = self.conn.execute(
            "UPDATE venue
             SET
                name = ?1,
                city = ?2,
                state = ?3,
                address = ?4,
                phone = ?5,
                genres = ?6,
                facebook_link = ?7,
                image_link = ?8,
                website_link = ?9,
                seeking_talent = ?10,
                seeking_description = ?11
             WHERE id = ?12;",
            params![
                input.name,
                input.city,
                input.state,
                input.address,
                input.phone,
                join_genres(&input.genres),
                input.facebook_link,
                input.image_link,
                input.website_link,
                bool_to_int(input.seeking_talent),
                input.seeking_description,
                id,
            ],
        )?;

        ensure_changed(changed, EntityKind::Venue, id)
    }

    fn delete_venue(&self, id: VenueId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM venue WHERE id = ?1;", [id])?;
        ensure_changed(changed, EntityKind::Venue, id)
    }

    fn get_venue(&self, id: VenueId) -> RepoResult<Option<Venue>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{VENUE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_venue_row(row)?));
        }
        Ok(None)
    }

    fn venue_name(&self, id: VenueId) -> RepoResult<Option<String>> {
        let name = self
            .conn
            .query_row("SELECT name FROM venue WHERE id = ?1;", [id], |row| row.get(0))
            .optional()?;
        Ok(name)
    }

    fn count_venue_shows(&self, id: VenueId) -> RepoResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM show WHERE venue_id = ?1;",
            [id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn parse_venue_row(row: &Row<'_>) -> RepoResult<Venue> {
    let genres_text: String = row.get("genres")?;
    Ok(Venue {
        id: row.get("id")?,
        name: row.get("name")?,
        city: row.get("city")?,
        state: row.get("state")?,
        address: row.get("address")?,
        phone: row.get("phone")?,
        genres: decode_genres("venue.genres", &genres_text)?,
        facebook_link: row.get("facebook_link")?,
        image_link: row.get("image_link")?,
        website_link: row.get("website_link")?,
        seeking_talent: int_to_bool("venue.seeking_talent", row.get("seeking_talent")?)?,
        seeking_description: row.get("seeking_description")?,
    })
}
