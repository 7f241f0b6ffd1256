//! Demo directory data for fresh databases.
//!
//! Seeding runs in one session and only touches an empty directory.

use crate::context::RequestContext;
use crate::model::artist::ArtistInput;
use crate::model::genre::Genre;
use crate::model::show::{parse_start_time, ShowInput};
use crate::model::venue::VenueInput;
use crate::repo::artist_repo::{ArtistRepository, SqliteArtistRepository};
use crate::repo::show_repo::{ShowRepository, SqliteShowRepository};
use crate::repo::venue_repo::{SqliteVenueRepository, VenueRepository};
use crate::repo::RepoResult;
use log::info;
use rusqlite::Connection;
use serde::Serialize;

/// What a seeding call inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub venues: usize,
    pub artists: usize,
    pub shows: usize,
    /// `true` when the directory already had data and nothing was written.
    pub skipped: bool,
}

/// Inserts the sample venues, artists and shows when the directory is empty.
///
/// The emptiness check and the inserts share one write session.
pub fn seed_demo_data(ctx: &mut RequestContext<'_>) -> RepoResult<SeedSummary> {
    let session = ctx.begin("demo_seed")?;
    if !directory_is_empty(session.conn())? {
        session.commit()?;
        info!("event=demo_seed module=service status=skipped reason=not_empty");
        return Ok(SeedSummary {
            skipped: true,
            ..SeedSummary::default()
        });
    }

    let conn = session.conn();
    let venues = SqliteVenueRepository::new(conn);
    let artists = SqliteArtistRepository::new(conn);
    let shows = SqliteShowRepository::new(conn);

    let mut venue_ids = Vec::new();
    for input in demo_venues() {
        venue_ids.push(venues.insert_venue(&input)?);
    }
    let mut artist_ids = Vec::new();
    for input in demo_artists() {
        artist_ids.push(artists.insert_artist(&input)?);
    }

    // (venue index, artist index, start time)
    let bookings = [
        (0, 0, "2019-05-21T21:30:00"),
        (2, 1, "2019-06-15T23:00:00"),
        (2, 2, "2035-04-01T20:00:00"),
        (2, 2, "2035-04-08T20:00:00"),
        (2, 2, "2035-04-15T20:00:00"),
    ];
    for (venue_index, artist_index, start) in bookings {
        shows.insert_show(&ShowInput {
            venue_id: venue_ids[venue_index],
            artist_id: artist_ids[artist_index],
            start_time: parse_start_time(start)?,
        })?;
    }

    session.commit()?;
    let summary = SeedSummary {
        venues: venue_ids.len(),
        artists: artist_ids.len(),
        shows: bookings.len(),
        skipped: false,
    };
    info!(
        "event=demo_seed module=service status=ok venues={} artists={} shows={}",
        summary.venues, summary.artists, summary.shows
    );
    Ok(summary)
}

fn directory_is_empty(conn: &Connection) -> RepoResult<bool> {
    let rows: i64 = conn.query_row(
        "SELECT (SELECT COUNT(*) FROM venue) + (SELECT COUNT(*) FROM artist);",
        [],
        |row| row.get(0),
    )?;
    Ok(rows == 0)
}

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn demo_venues() -> Vec<VenueInput> {
    vec![
        VenueInput {
            name: "The Musical Hop".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: text("123-123-1234"),
            genres: vec![Genre::Jazz, Genre::Reggae, Genre::Classical, Genre::Folk],
            facebook_link: text("https://www.facebook.com/TheMusicalHop"),
            image_link: text("https://images.unsplash.com/photo-1543900694-133f37abaaa5?w=400&q=60"),
            website_link: text("https://www.themusicalhop.com"),
            seeking_talent: true,
            seeking_description: text(
                "We are on the lookout for a local artist to play every two weeks. Please call us.",
            ),
        },
        VenueInput {
            name: "The Dueling Pianos Bar".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            address: "335 Delancey Street".to_string(),
            phone: text("914-003-1132"),
            genres: vec![Genre::Classical, Genre::RhythmAndBlues, Genre::HipHop],
            facebook_link: text("https://www.facebook.com/theduelingpianos"),
            image_link: text("https://images.unsplash.com/photo-1497032205916-ac775f0649ae?w=750&q=80"),
            website_link: text("https://www.theduelingpianos.com"),
            seeking_talent: false,
            seeking_description: None,
        },
        VenueInput {
            name: "Park Square Live Music & Coffee".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "34 Whiskey Moore Ave".to_string(),
            phone: text("415-000-1234"),
            genres: vec![Genre::RockNRoll, Genre::Jazz, Genre::Classical, Genre::Folk],
            facebook_link: text("https://www.facebook.com/ParkSquareLiveMusicAndCoffee"),
            image_link: text("https://images.unsplash.com/photo-1485686531765-ba63b07845a7?w=747&q=80"),
            website_link: text("https://www.parksquarelivemusicandcoffee.com"),
            seeking_talent: false,
            seeking_description: None,
        },
    ]
}

fn demo_artists() -> Vec<ArtistInput> {
    vec![
        ArtistInput {
            name: "Guns N Petals".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: text("326-123-5000"),
            genres: vec![Genre::RockNRoll],
            facebook_link: text("https://www.facebook.com/GunsNPetals"),
            image_link: text("https://images.unsplash.com/photo-1549213783-8284d0336c4f?w=300&q=80"),
            website_link: text("https://www.gunsnpetalsband.com"),
            seeking_venue: true,
            seeking_description: text(
                "Looking for shows to perform at in the San Francisco Bay Area!",
            ),
        },
        ArtistInput {
            name: "Matt Quevedo".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            phone: text("300-400-5000"),
            genres: vec![Genre::Jazz],
            facebook_link: text("https://www.facebook.com/mattquevedo923251523"),
            image_link: text("https://images.unsplash.com/photo-1495223153807-b916f75de8c5?w=334&q=80"),
            website_link: None,
            seeking_venue: false,
            seeking_description: None,
        },
        ArtistInput {
            name: "The Wild Sax Band".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: text("432-325-5432"),
            genres: vec![Genre::Jazz, Genre::Classical],
            facebook_link: None,
            image_link: text("https://images.unsplash.com/photo-1558369981-f9ca78462e61?w=794&q=80"),
            website_link: None,
            seeking_venue: false,
            seeking_description: None,
        },
    ]
}
