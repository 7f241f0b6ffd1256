//! Artist read views: listing, search, detail and edit prefill.

use crate::context::RequestContext;
use crate::model::artist::{Artist, ArtistId, ArtistInput};
use crate::model::show::start_time_to_db;
use crate::model::EntityKind;
use crate::query::{
    list_named, parse_start_column, partition_by_start, search_by_name, NamedRecord,
    SearchResults,
};
use crate::repo::artist_repo::{ArtistRepository, SqliteArtistRepository};
use crate::repo::RepoResult;
use serde::Serialize;

/// A show on an artist page, described by its venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

/// Artist page model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Lists every artist as `{id, name}`, ordered by id.
pub fn list_artists(ctx: &RequestContext<'_>) -> RepoResult<Vec<NamedRecord>> {
    list_named(ctx.conn(), EntityKind::Artist)
}

/// Case-insensitive substring search on artist names.
pub fn search_artists(ctx: &RequestContext<'_>, term: &str) -> RepoResult<SearchResults> {
    search_by_name(ctx.conn(), EntityKind::Artist, term)
}

/// Loads one artist page, or `None` when the id is unknown.
pub fn artist_detail(
    ctx: &RequestContext<'_>,
    id: ArtistId,
) -> RepoResult<Option<ArtistDetail>> {
    let Some(artist) = SqliteArtistRepository::new(ctx.conn()).get_artist(id)? else {
        return Ok(None);
    };

    let mut stmt = ctx.conn().prepare(
        "SELECT
            v.id AS venue_id,
            v.name AS venue_name,
            v.image_link AS venue_image_link,
            s.start_time AS start_time
         FROM show s
         INNER JOIN venue v ON v.id = s.venue_id
         WHERE s.artist_id = ?1
         ORDER BY s.start_time ASC, s.id ASC;",
    )?;
    let mut rows = stmt.query([id])?;
    let mut timed = Vec::new();
    while let Some(row) = rows.next()? {
        let start_text: String = row.get("start_time")?;
        let start_time = parse_start_column(&start_text)?;
        timed.push((
            start_time,
            ArtistShow {
                venue_id: row.get("venue_id")?,
                venue_name: row.get("venue_name")?,
                venue_image_link: row.get("venue_image_link")?,
                start_time: start_time_to_db(start_time),
            },
        ));
    }

    let (past_shows, upcoming_shows) = partition_by_start(timed, ctx.now());
    Ok(Some(ArtistDetail {
        artist,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}

/// Loads an artist as edit-form values, or `None` when the id is unknown.
pub fn artist_form(ctx: &RequestContext<'_>, id: ArtistId) -> RepoResult<Option<ArtistInput>> {
    let artist = SqliteArtistRepository::new(ctx.conn()).get_artist(id)?;
    Ok(artist.map(ArtistInput::from))
}
