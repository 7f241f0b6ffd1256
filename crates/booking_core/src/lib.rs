//! Core logic for the venue/artist/show booking directory.
//! This crate owns the schema, read views and transactional mutations.

pub mod config;
pub mod context;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use config::{BookingConfig, ConfigError};
pub use context::{RequestContext, Session, SessionState};
pub use logging::{default_log_level, init_logging, logging_status, LogSink};
pub use model::artist::{Artist, ArtistId, ArtistInput};
pub use model::genre::{join_genres, split_genres, Genre};
pub use model::show::{
    format_start_time, parse_start_time, start_time_from_db, DateFormat, Show, ShowId,
    ShowInput, TimeBucket,
};
pub use model::validation::{checkbox_value, ValidationError};
pub use model::venue::{Venue, VenueId, VenueInput};
pub use model::EntityKind;
pub use query::artist_query::{
    artist_detail, artist_form, list_artists, search_artists, ArtistDetail, ArtistShow,
};
pub use query::show_query::{list_shows, ShowListing};
pub use query::venue_query::{
    list_venue_areas, search_venues, venue_detail, venue_form, AreaVenue, VenueArea,
    VenueDetail, VenueShow,
};
pub use query::{name_matches, NamedRecord, SearchResults};
pub use repo::{RepoError, RepoResult};
pub use service::artist_service::{create_artist, delete_artist, update_artist};
pub use service::seed::{seed_demo_data, SeedSummary};
pub use service::show_service::{create_show, delete_show, update_show};
pub use service::venue_service::{create_venue, delete_venue, update_venue};
pub use service::{success_notice, MutationKind, PersistError, PersistFailure};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
