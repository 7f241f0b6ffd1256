//! Subcommands and their dispatch onto core use cases.
//!
//! Reads print JSON page models. Writes print the user-visible notice; a
//! failed write exits non-zero with the generic failure notice while the
//! cause goes to the log.

use anyhow::{anyhow, bail, Result};
use booking_core::{
    artist_detail, artist_form, checkbox_value, create_artist, create_show, create_venue,
    delete_artist, delete_show, delete_venue, format_start_time, list_artists, list_shows,
    list_venue_areas, parse_start_time, search_artists, search_venues, seed_demo_data,
    start_time_from_db, success_notice, update_artist, update_show, update_venue, venue_detail,
    venue_form, ArtistInput, DateFormat, EntityKind, Genre, MutationKind, PersistError,
    RequestContext, ShowInput, ValidationError, VenueInput,
};
use chrono::NaiveDateTime;
use clap::{Args, Subcommand, ValueEnum};
use log::warn;
use serde::Serialize;
use std::str::FromStr;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List venues grouped by city and state with upcoming show counts
    Venues,
    /// Show one venue with its past and upcoming shows
    Venue { id: i64 },
    /// Case-insensitive partial-name venue search
    SearchVenues {
        #[arg(default_value = "")]
        term: String,
    },
    /// List a new venue
    CreateVenue(VenueArgs),
    /// Edit a venue; omitted flags keep their stored values
    EditVenue {
        id: i64,
        #[command(flatten)]
        fields: VenueArgs,
    },
    /// Delete a venue that no show references
    DeleteVenue { id: i64 },
    /// List artists
    Artists,
    /// Show one artist with their past and upcoming shows
    Artist { id: i64 },
    /// Case-insensitive partial-name artist search
    SearchArtists {
        #[arg(default_value = "")]
        term: String,
    },
    /// List a new artist
    CreateArtist(ArtistArgs),
    /// Edit an artist; omitted flags keep their stored values
    EditArtist {
        id: i64,
        #[command(flatten)]
        fields: ArtistArgs,
    },
    /// Delete an artist that no show references
    DeleteArtist { id: i64 },
    /// List every show with venue and artist names
    Shows,
    /// Book an artist at a venue
    CreateShow(ShowArgs),
    /// Move or rebook a show
    EditShow {
        id: i64,
        #[command(flatten)]
        fields: ShowArgs,
    },
    /// Delete a show
    DeleteShow { id: i64 },
    /// Insert demo venues, artists and shows into an empty database
    Seed,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Venues => "venues",
            Self::Venue { .. } => "venue",
            Self::SearchVenues { .. } => "search-venues",
            Self::CreateVenue(_) => "create-venue",
            Self::EditVenue { .. } => "edit-venue",
            Self::DeleteVenue { .. } => "delete-venue",
            Self::Artists => "artists",
            Self::Artist { .. } => "artist",
            Self::SearchArtists { .. } => "search-artists",
            Self::CreateArtist(_) => "create-artist",
            Self::EditArtist { .. } => "edit-artist",
            Self::DeleteArtist { .. } => "delete-artist",
            Self::Shows => "shows",
            Self::CreateShow(_) => "create-show",
            Self::EditShow { .. } => "edit-show",
            Self::DeleteShow { .. } => "delete-show",
            Self::Seed => "seed",
        }
    }
}

/// How start times are printed in detail pages and the show listing.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateStyle {
    /// Stored form, `2019-05-21 21:30:00`
    #[default]
    Raw,
    /// `Tuesday May, 21, 2019 at 9:30PM`
    Full,
    /// `Tue 05, 21, 2019 9:30PM`
    Medium,
}

impl DateStyle {
    fn format(self) -> Option<DateFormat> {
        match self {
            Self::Raw => None,
            Self::Full => Some(DateFormat::Full),
            Self::Medium => Some(DateFormat::Medium),
        }
    }

    fn restyle(self, start_time: &mut String) {
        let Some(format) = self.format() else {
            return;
        };
        if let Some(value) = start_time_from_db(start_time) {
            *start_time = format_start_time(value, format);
        }
    }
}

/// Venue form fields. Every flag is optional so the same set serves create
/// and partial edit.
#[derive(Args, Debug, Default)]
pub struct VenueArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    /// Genre label, repeatable (e.g. --genre Jazz --genre "R&B")
    #[arg(long = "genre", value_parser = parse_genre)]
    genres: Vec<Genre>,
    #[arg(long)]
    facebook_link: Option<String>,
    #[arg(long)]
    image_link: Option<String>,
    #[arg(long)]
    website_link: Option<String>,
    /// Checkbox value: y, on, true or 1 means checked
    #[arg(long)]
    seeking_talent: Option<String>,
    #[arg(long)]
    seeking_description: Option<String>,
}

impl VenueArgs {
    fn apply(self, mut input: VenueInput) -> VenueInput {
        overwrite(&mut input.name, self.name);
        overwrite(&mut input.city, self.city);
        overwrite(&mut input.state, self.state);
        overwrite(&mut input.address, self.address);
        overwrite_optional(&mut input.phone, self.phone);
        if !self.genres.is_empty() {
            input.genres = self.genres;
        }
        overwrite_optional(&mut input.facebook_link, self.facebook_link);
        overwrite_optional(&mut input.image_link, self.image_link);
        overwrite_optional(&mut input.website_link, self.website_link);
        if let Some(flag) = self.seeking_talent {
            input.seeking_talent = checkbox_value(Some(&flag));
        }
        overwrite_optional(&mut input.seeking_description, self.seeking_description);
        input
    }
}

/// Artist form fields, optional for the same reason as [`VenueArgs`].
#[derive(Args, Debug, Default)]
pub struct ArtistArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    /// Genre label, repeatable
    #[arg(long = "genre", value_parser = parse_genre)]
    genres: Vec<Genre>,
    #[arg(long)]
    facebook_link: Option<String>,
    #[arg(long)]
    image_link: Option<String>,
    #[arg(long)]
    website_link: Option<String>,
    /// Checkbox value: y, on, true or 1 means checked
    #[arg(long)]
    seeking_venue: Option<String>,
    #[arg(long)]
    seeking_description: Option<String>,
}

impl ArtistArgs {
    fn apply(self, mut input: ArtistInput) -> ArtistInput {
        overwrite(&mut input.name, self.name);
        overwrite(&mut input.city, self.city);
        overwrite(&mut input.state, self.state);
        overwrite_optional(&mut input.phone, self.phone);
        if !self.genres.is_empty() {
            input.genres = self.genres;
        }
        overwrite_optional(&mut input.facebook_link, self.facebook_link);
        overwrite_optional(&mut input.image_link, self.image_link);
        overwrite_optional(&mut input.website_link, self.website_link);
        if let Some(flag) = self.seeking_venue {
            input.seeking_venue = checkbox_value(Some(&flag));
        }
        overwrite_optional(&mut input.seeking_description, self.seeking_description);
        input
    }
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    #[arg(long)]
    venue_id: i64,
    #[arg(long)]
    artist_id: i64,
    /// `YYYY-MM-DD HH:MM[:SS]`, `YYYY-MM-DDTHH:MM[:SS]` or RFC 3339
    #[arg(long, value_parser = parse_start)]
    start_time: NaiveDateTime,
}

impl From<ShowArgs> for ShowInput {
    fn from(args: ShowArgs) -> Self {
        ShowInput {
            venue_id: args.venue_id,
            artist_id: args.artist_id,
            start_time: args.start_time,
        }
    }
}

fn parse_genre(value: &str) -> Result<Genre, ValidationError> {
    Genre::from_str(value)
}

fn parse_start(value: &str) -> Result<NaiveDateTime, ValidationError> {
    parse_start_time(value)
}

fn overwrite(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *target = value;
    }
}

// An explicitly empty flag clears the stored value.
fn overwrite_optional(target: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value {
        *target = Some(value);
    }
}

pub fn run(command: Command, ctx: &mut RequestContext<'_>, dates: DateStyle) -> Result<()> {
    match command {
        Command::Venues => print_json(&list_venue_areas(ctx)?),
        Command::Venue { id } => {
            let mut detail = venue_detail(ctx, id)?;
            if let Some(detail) = detail.as_mut() {
                for show in detail.past_shows.iter_mut().chain(&mut detail.upcoming_shows) {
                    dates.restyle(&mut show.start_time);
                }
            }
            print_json(&detail)
        }
        Command::SearchVenues { term } => print_json(&search_venues(ctx, &term)?),
        Command::CreateVenue(fields) => {
            let venue = create_venue(ctx, fields.apply(VenueInput::default()))
                .map_err(failed)?;
            notify(EntityKind::Venue, MutationKind::Create, &venue.name);
            Ok(())
        }
        Command::EditVenue { id, fields } => {
            let Some(current) = venue_form(ctx, id)? else {
                bail!("Venue {id} not found");
            };
            let venue = update_venue(ctx, id, fields.apply(current)).map_err(failed)?;
            notify(EntityKind::Venue, MutationKind::Update, &venue.name);
            Ok(())
        }
        Command::DeleteVenue { id } => {
            let name = delete_venue(ctx, id).map_err(failed)?;
            notify(EntityKind::Venue, MutationKind::Delete, &name);
            Ok(())
        }
        Command::Artists => print_json(&list_artists(ctx)?),
        Command::Artist { id } => {
            let mut detail = artist_detail(ctx, id)?;
            if let Some(detail) = detail.as_mut() {
                for show in detail.past_shows.iter_mut().chain(&mut detail.upcoming_shows) {
                    dates.restyle(&mut show.start_time);
                }
            }
            print_json(&detail)
        }
        Command::SearchArtists { term } => print_json(&search_artists(ctx, &term)?),
        Command::CreateArtist(fields) => {
            let artist = create_artist(ctx, fields.apply(ArtistInput::default()))
                .map_err(failed)?;
            notify(EntityKind::Artist, MutationKind::Create, &artist.name);
            Ok(())
        }
        Command::EditArtist { id, fields } => {
            let Some(current) = artist_form(ctx, id)? else {
                bail!("Artist {id} not found");
            };
            let artist = update_artist(ctx, id, fields.apply(current)).map_err(failed)?;
            notify(EntityKind::Artist, MutationKind::Update, &artist.name);
            Ok(())
        }
        Command::DeleteArtist { id } => {
            let name = delete_artist(ctx, id).map_err(failed)?;
            notify(EntityKind::Artist, MutationKind::Delete, &name);
            Ok(())
        }
        Command::Shows => {
            let mut shows = list_shows(ctx)?;
            for show in &mut shows {
                dates.restyle(&mut show.start_time);
            }
            print_json(&shows)
        }
        Command::CreateShow(fields) => {
            create_show(ctx, fields.into()).map_err(failed)?;
            println!(
                "{}",
                success_notice(EntityKind::Show, MutationKind::Create, None)
            );
            Ok(())
        }
        Command::EditShow { id, fields } => {
            update_show(ctx, id, fields.into()).map_err(failed)?;
            println!(
                "{}",
                success_notice(EntityKind::Show, MutationKind::Update, None)
            );
            Ok(())
        }
        Command::DeleteShow { id } => {
            delete_show(ctx, id).map_err(failed)?;
            println!(
                "{}",
                success_notice(EntityKind::Show, MutationKind::Delete, None)
            );
            Ok(())
        }
        Command::Seed => print_json(&seed_demo_data(ctx)?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn notify(entity: EntityKind, operation: MutationKind, subject: &str) {
    println!("{}", success_notice(entity, operation, Some(subject)));
}

fn failed(err: PersistError) -> anyhow::Error {
    warn!(
        "event=cli_mutation module=cli status=error entity={} error={err}",
        err.entity
    );
    anyhow!(err.notice())
}
