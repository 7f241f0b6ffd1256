//! Show listing.

use crate::context::RequestContext;
use crate::model::show::start_time_to_db;
use crate::query::parse_start_column;
use crate::repo::RepoResult;
use serde::Serialize;

/// One row of the show listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub show_id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// Lists every show with its venue and artist display fields, regardless of
/// time. Ordered by start time, then id.
pub fn list_shows(ctx: &RequestContext<'_>) -> RepoResult<Vec<ShowListing>> {
    let mut stmt = ctx.conn().prepare(
        "SELECT
            s.id AS show_id,
            s.venue_id AS venue_id,
            v.name AS venue_name,
            s.artist_id AS artist_id,
            a.name AS artist_name,
            a.image_link AS artist_image_link,
            s.start_time AS start_time
         FROM show s
         INNER JOIN venue v ON v.id = s.venue_id
         INNER JOIN artist a ON a.id = s.artist_id
         ORDER BY s.start_time ASC, s.id ASC;",
    )?;
    let mut rows = stmt.query([])?;
    let mut shows = Vec::new();
    while let Some(row) = rows.next()? {
        let start_text: String = row.get("start_time")?;
        shows.push(ShowListing {
            show_id: row.get("show_id")?,
            venue_id: row.get("venue_id")?,
            venue_name: row.get("venue_name")?,
            artist_id: row.get("artist_id")?,
            artist_name: row.get("artist_name")?,
            artist_image_link: row.get("artist_image_link")?,
            start_time: start_time_to_db(parse_start_column(&start_text)?),
        });
    }
    Ok(shows)
}
