//! Venue read views: grouped browsing, search, detail and edit prefill.

use crate::context::RequestContext;
use crate::model::show::start_time_to_db;
use crate::model::venue::{Venue, VenueId, VenueInput};
use crate::model::EntityKind;
use crate::query::{parse_start_column, partition_by_start, search_by_name, SearchResults};
use crate::repo::venue_repo::{SqliteVenueRepository, VenueRepository};
use crate::repo::RepoResult;
use serde::Serialize;

/// Venue entry inside one city/state group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaVenue {
    pub id: VenueId,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// All venues sharing one exact (city, state) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<AreaVenue>,
}

/// A show on a venue page, described by its artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// Venue page model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Lists venues grouped by exact (city, state), each with its number of
/// shows starting after the context instant.
///
/// Venues without upcoming shows are listed with a count of 0. Groups are
/// ordered by state then city; venues inside a group by id.
pub fn list_venue_areas(ctx: &RequestContext<'_>) -> RepoResult<Vec<VenueArea>> {
    let mut stmt = ctx.conn().prepare(
        "SELECT
            v.id AS id,
            v.name AS name,
            v.city AS city,
            v.state AS state,
            COUNT(s.id) AS num_upcoming_shows
         FROM venue v
         LEFT OUTER JOIN show s
           ON s.venue_id = v.id
          AND s.start_time > ?1
         GROUP BY v.id, v.name, v.city, v.state
         ORDER BY v.state ASC, v.city ASC, v.id ASC;",
    )?;
    let mut rows = stmt.query([ctx.now_db_text()])?;
    let mut areas: Vec<VenueArea> = Vec::new();

    while let Some(row) = rows.next()? {
        let city: String = row.get("city")?;
        let state: String = row.get("state")?;
        let venue = AreaVenue {
            id: row.get("id")?,
            name: row.get("name")?,
            num_upcoming_shows: row.get("num_upcoming_shows")?,
        };

        if let Some(area) = areas
            .last_mut()
            .filter(|area| area.city == city && area.state == state)
        {
            area.venues.push(venue);
        } else {
            areas.push(VenueArea {
                city,
                state,
                venues: vec![venue],
            });
        }
    }

    Ok(areas)
}

/// Case-insensitive substring search on venue names.
pub fn search_venues(ctx: &RequestContext<'_>, term: &str) -> RepoResult<SearchResults> {
    search_by_name(ctx.conn(), EntityKind::Venue, term)
}

/// Loads one venue page, or `None` when the id is unknown.
pub fn venue_detail(ctx: &RequestContext<'_>, id: VenueId) -> RepoResult<Option<VenueDetail>> {
    let Some(venue) = SqliteVenueRepository::new(ctx.conn()).get_venue(id)? else {
        return Ok(None);
    };

    let mut stmt = ctx.conn().prepare(
        "SELECT
            a.id AS artist_id,
            a.name AS artist_name,
            a.image_link AS artist_image_link,
            s.start_time AS start_time
         FROM show s
         INNER JOIN artist a ON a.id = s.artist_id
         WHERE s.venue_id = ?1
         ORDER BY s.start_time ASC, s.id ASC;",
    )?;
    let mut rows = stmt.query([id])?;
    let mut timed = Vec::new();
    while let Some(row) = rows.next()? {
        let start_text: String = row.get("start_time")?;
        let start_time = parse_start_column(&start_text)?;
        timed.push((
            start_time,
            VenueShow {
                artist_id: row.get("artist_id")?,
                artist_name: row.get("artist_name")?,
                artist_image_link: row.get("artist_image_link")?,
                start_time: start_time_to_db(start_time),
            },
        ));
    }

    let (past_shows, upcoming_shows) = partition_by_start(timed, ctx.now());
    Ok(Some(VenueDetail {
        venue,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}

/// Loads a venue as edit-form values, or `None` when the id is unknown.
pub fn venue_form(ctx: &RequestContext<'_>, id: VenueId) -> RepoResult<Option<VenueInput>> {
    let venue = SqliteVenueRepository::new(ctx.conn()).get_venue(id)?;
    Ok(venue.map(VenueInput::from))
}
