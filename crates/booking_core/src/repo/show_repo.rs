//! Show repository contract and SQLite implementation.

use crate::model::show::{start_time_to_db, ShowId, ShowInput};
use crate::model::EntityKind;
use crate::repo::{ensure_changed, RepoResult};
use rusqlite::{params, Connection};

/// Repository interface for show point operations.
pub trait ShowRepository {
    /// Inserts a show; unknown venue/artist ids fail on the foreign keys.
    fn insert_show(&self, input: &ShowInput) -> RepoResult<ShowId>;
    fn update_show(&self, id: ShowId, input: &ShowInput) -> RepoResult<()>;
    fn delete_show(&self, id: ShowId) -> RepoResult<()>;
}

/// SQLite-backed show repository.
pub struct SqliteShowRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteShowRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ShowRepository for SqliteShowRepository<'_> {
    fn insert_show(&self, input: &ShowInput) -> RepoResult<ShowId> {
        input.validate()?;

        self.conn.execute(
            "INSERT INTO show (venue_id, artist_id, start_time) VALUES (?1, ?2, ?3);",
            params![
                input.venue_id,
                input.artist_id,
                start_time_to_db(input.start_time),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_show(&self, id: ShowId, input: &ShowInput) -> RepoResult<()> {
        input.validate()?;

        let changed = self.conn.execute(
            "UPDATE show
             SET
                venue_id = ?1,
                artist_id = ?2,
                start_time = ?3
             WHERE id = ?4;",
            params![
                input.venue_id,
                input.artist_id,
                start_time_to_db(input.start_time),
                id,
            ],
        )?;

        ensure_changed(changed, EntityKind::Show, id)
    }

    fn delete_show(&self, id: ShowId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM show WHERE id = ?1;", [id])?;
        ensure_changed(changed, EntityKind::Show, id)
    }
}
