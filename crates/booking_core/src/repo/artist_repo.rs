//! Artist repository contract and SQLite implementation.

use crate::model::artist::{Artist, ArtistId, ArtistInput};
use crate::model::genre::join_genres;
use crate::model::EntityKind;
use crate::repo::{bool_to_int, decode_genres, ensure_changed, int_to_bool, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const ARTIST_SELECT_SQL: &str = "SELECT
    id,
    name,
    city,
    state,
    phone,
    genres,
    facebook_link,
    image_link,
    website_link,
    seeking_venue,
    seeking_description
FROM artist";

/// Repository interface for artist point operations.
pub trait ArtistRepository {
    fn insert_artist(&self, input: &ArtistInput) -> RepoResult<ArtistId>;
    fn update_artist(&self, id: ArtistId, input: &ArtistInput) -> RepoResult<()>;
    fn delete_artist(&self, id: ArtistId) -> RepoResult<()>;
    fn get_artist(&self, id: ArtistId) -> RepoResult<Option<Artist>>;
    fn artist_name(&self, id: ArtistId) -> RepoResult<Option<String>>;
    fn count_artist_shows(&self, id: ArtistId) -> RepoResult<i64>;
}

/// SQLite-backed artist repository.
pub struct SqliteArtistRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteArtistRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ArtistRepository for SqliteArtistRepository<'_> {
    fn insert_artist(&self, input: &ArtistInput) -> RepoResult<ArtistId> {
        input.validate()?;

        self.conn.execute(
            "INSERT INTO artist (
                name,
                city,
                state,
                phone,
                genres,
                facebook_link,
                image_link,
                website_link,
                seeking_venue,
                seeking_description
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                input.name,
                input.city,
                input.state,
                input.phone,
                join_genres(&input.genres),
                input.facebook_link,
                input.image_link,
                input.website_link,
                bool_to_int(input.seeking_venue),
                input.seeking_description,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_artist(&self, id: ArtistId, input: &ArtistInput) -> RepoResult<()> {
        input.validate()?;

        let changed = self.conn.execute(
            "UPDATE artist
             SET
                name = ?1,
                city = ?2,
                state = ?3,
                phone = ?4,
                genres = ?5,
                facebook_link = ?6,
                image_link = ?7,
                website_link = ?8,
                seeking_venue = ?9,
                seeking_description = ?10
             WHERE id = ?11;",
            params![
                input.name,
                input.city,
                input.state,
                input.phone,
                join_genres(&input.genres),
                input.facebook_link,
                input.image_link,
                input.website_link,
                bool_to_int(input.seeking_venue),
                input.seeking_description,
                id,
            ],
        )?;

        ensure_changed(changed, EntityKind::Artist, id)
    }

    fn delete_artist(&self, id: ArtistId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM artist WHERE id = ?1;", [id])?;
        ensure_changed(changed, EntityKind::Artist, id)
    }

    fn get_artist(&self, id: ArtistId) -> RepoResult<Option<Artist>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ARTIST_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_artist_row(row)?));
        }
        Ok(None)
    }

    fn artist_name(&self, id: ArtistId) -> RepoResult<Option<String>> {
        let name = self
            .conn
            .query_row("SELECT name FROM artist WHERE id = ?1;", [id], |row| row.get(0))
            .optional()?;
        Ok(name)
    }

    fn count_artist_shows(&self, id: ArtistId) -> RepoResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM show WHERE artist_id = ?1;",
            [id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn parse_artist_row(row: &Row<'_>) -> RepoResult<Artist> {
    let genres_text: String = row.get("genres")?;
    Ok(Artist {
        id: row.get("id")?,
        name: row.get("name")?,
        city: row.get("city")?,
        state: row.get("state")?,
        phone: row.get("phone")?,
        genres: decode_genres("artist.genres", &genres_text)?,
        facebook_link: row.get("facebook_link")?,
        image_link: row.get("image_link")?,
        website_link: row.get("website_link")?,
        seeking_venue: int_to_bool("artist.seeking_venue", row.get("seeking_venue")?)?,
        seeking_description: row.get("seeking_description")?,
    })
}
