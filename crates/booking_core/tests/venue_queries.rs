use booking_core::db::open_db_in_memory;
use booking_core::{
    create_artist, create_show, create_venue, list_venue_areas, search_venues, venue_detail,
    venue_form, ArtistInput, Genre, PersistFailure, RequestContext, ShowInput,
    ValidationError, VenueInput,
};
use chrono::{Duration, NaiveDate, NaiveDateTime};

fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn venue(name: &str, city: &str, state: &str) -> VenueInput {
    VenueInput {
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        address: "1 Main Street".to_string(),
        genres: vec![Genre::Jazz, Genre::Folk],
        ..VenueInput::default()
    }
}

fn artist(name: &str) -> ArtistInput {
    ArtistInput {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        image_link: Some(format!("https://img.example.com/{}.png", name.len())),
        ..ArtistInput::default()
    }
}

fn book(ctx: &mut RequestContext<'_>, venue_id: i64, artist_id: i64, start_time: NaiveDateTime) {
    create_show(
        ctx,
        ShowInput {
            venue_id,
            artist_id,
            start_time,
        },
    )
    .unwrap();
}

#[test]
fn areas_group_by_exact_city_and_state_with_upcoming_counts() {
    let mut conn = open_db_in_memory().unwrap();
    let mut ctx = RequestContext::at(&mut conn, fixed_now());
    let hop = create_venue(&mut ctx, venue("The Musical Hop", "San Francisco", "CA")).unwrap();
    let pianos = create_venue(&mut ctx, venue("The Dueling Pianos Bar", "New York", "NY")).unwrap();
    let park = create_venue(
        &mut ctx,
        venue("Park Square Live Music & Coffee", "San Francisco", "CA"),
    )
    .unwrap();
    let band = create_artist(&mut ctx, artist("The Wild Sax Band")).unwrap();

    book(&mut ctx, park.id, band.id, fixed_now() + Duration::days(1));
    book(&mut ctx, park.id, band.id, fixed_now() + Duration::days(8));
    book(&mut ctx, park.id, band.id, fixed_now() - Duration::days(8));
    book(&mut ctx, hop.id, band.id, fixed_now() - Duration::days(1));

    let areas = list_venue_areas(&ctx).unwrap();
    assert_eq!(areas.len(), 2);

    let sf = areas
        .iter()
        .find(|area| area.city == "San Francisco" && area.state == "CA")
        .unwrap();
    let counts: Vec<(i64, i64)> = sf
        .venues
        .iter()
        .map(|venue| (venue.id, venue.num_upcoming_shows))
        .collect();
    assert_eq!(counts, vec![(hop.id, 0), (park.id, 2)]);

    let ny = areas.iter().find(|area| area.state == "NY").unwrap();
    assert_eq!(ny.venues.len(), 1);
    assert_eq!(ny.venues[0].id, pianos.id);
    assert_eq!(ny.venues[0].num_upcoming_shows, 0);
}

#[test]
fn venue_without_any_show_is_listed_with_zero_count() {
    let mut conn = open_db_in_memory().unwrap();
    let mut ctx = RequestContext::at(&mut conn, fixed_now());
    let lonely = create_venue(&mut ctx, venue("Empty Room", "Austin", "TX")).unwrap();

    let areas = list_venue_areas(&ctx).unwrap();
    assert_eq!(areas.len(), 1);
    assert_eq!(areas[0].venues.len(), 1);
    assert_eq!(areas[0].venues[0].id, lonely.id);
    assert_eq!(areas[0].venues[0].num_upcoming_shows, 0);
}

#[test]
fn area_grouping_is_case_sensitive() {
    let mut conn = open_db_in_memory().unwrap();
    let mut ctx = RequestContext::at(&mut conn, fixed_now());
    create_venue(&mut ctx, venue("Upper", "Portland", "OR")).unwrap();
    create_venue(&mut ctx, venue("Lower", "portland", "OR")).unwrap();

    let areas = list_venue_areas(&ctx).unwrap();
    assert_eq!(areas.len(), 2);
}

#[test]
fn show_exactly_at_now_is_not_counted_as_upcoming() {
    let mut conn = open_db_in_memory().unwrap();
    let mut ctx = RequestContext::at(&mut conn, fixed_now());
    let hop = create_venue(&mut ctx, venue("The Musical Hop", "San Francisco", "CA")).unwrap();
    let band = create_artist(&mut ctx, artist("Guns N Petals")).unwrap();
    book(&mut ctx, hop.id, band.id, fixed_now());

    let areas = list_venue_areas(&ctx).unwrap();
    assert_eq!(areas[0].venues[0].num_upcoming_shows, 0);
}

#[test]
fn grouped_count_and_detail_agree_on_far_future_shows() {
    let mut conn = open_db_in_memory().unwrap();
    let mut ctx = RequestContext::at(&mut conn, fixed_now());
    let hop = create_venue(&mut ctx, venue("The Musical Hop", "San Francisco", "CA")).unwrap();
    let band = create_artist(&mut ctx, artist("Guns N Petals")).unwrap();
    let last_storable = NaiveDate::from_ymd_opt(9999, 12, 31)
        .unwrap()
        .and_hms_opt(23, 59, 59)
        .unwrap();
    book(&mut ctx, hop.id, band.id, last_storable);

    let too_far = NaiveDate::from_ymd_opt(10000, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let err = create_show(
        &mut ctx,
        ShowInput {
            venue_id: hop.id,
            artist_id: band.id,
            start_time: too_far,
        },
    )
    .unwrap_err();
    assert!(matches!(
        err.failure,
        PersistFailure::Invalid(ValidationError::InvalidStartTime(_))
    ));

    let areas = list_venue_areas(&ctx).unwrap();
    let detail = venue_detail(&ctx, hop.id).unwrap().unwrap();
    assert_eq!(areas[0].venues[0].num_upcoming_shows, 1);
    assert_eq!(
        areas[0].venues[0].num_upcoming_shows as usize,
        detail.upcoming_shows_count
    );
}

#[test]
fn search_is_case_insensitive_substring_match() {
    let mut conn = open_db_in_memory().unwrap();
    let mut ctx = RequestContext::at(&mut conn, fixed_now());
    let hop = create_venue(&mut ctx, venue("The Musical Hop", "San Francisco", "CA")).unwrap();
    create_venue(&mut ctx, venue("The Dueling Pianos Bar", "New York", "NY")).unwrap();
    let park = create_venue(
        &mut ctx,
        venue("Park Square Live Music & Coffee", "San Francisco", "CA"),
    )
    .unwrap();

    for term in ["hop", "HOP", "Hop"] {
        let results = search_venues(&ctx, term).unwrap();
        assert_eq!(results.count, 1, "term {term}");
        assert_eq!(results.data[0].id, hop.id);
        assert_eq!(results.data[0].name, "The Musical Hop");
    }

    let music = search_venues(&ctx, "Music").unwrap();
    let ids: Vec<i64> = music.data.iter().map(|record| record.id).collect();
    assert_eq!(music.count, 2);
    assert_eq!(ids, vec![hop.id, park.id]);
}

#[test]
fn empty_search_term_matches_every_venue() {
    let mut conn = open_db_in_memory().unwrap();
    let mut ctx = RequestContext::at(&mut conn, fixed_now());
    create_venue(&mut ctx, venue("A", "X", "Y")).unwrap();
    create_venue(&mut ctx, venue("B", "X", "Y")).unwrap();

    let results = search_venues(&ctx, "").unwrap();
    assert_eq!(results.count, 2);

    let none = search_venues(&ctx, "zzz").unwrap();
    assert_eq!(none.count, 0);
    assert!(none.data.is_empty());
}

#[test]
fn detail_splits_shows_into_past_and_upcoming() {
    let mut conn = open_db_in_memory().unwrap();
    let mut ctx = RequestContext::at(&mut conn, fixed_now());
    let hop = create_venue(&mut ctx, venue("The Musical Hop", "San Francisco", "CA")).unwrap();
    let petals = create_artist(&mut ctx, artist("Guns N Petals")).unwrap();
    let sax = create_artist(&mut ctx, artist("The Wild Sax Band")).unwrap();

    book(&mut ctx, hop.id, petals.id, fixed_now() - Duration::days(3));
    book(&mut ctx, hop.id, sax.id, fixed_now());
    book(&mut ctx, hop.id, sax.id, fixed_now() + Duration::hours(2));
    book(&mut ctx, hop.id, petals.id, fixed_now() + Duration::days(30));

    let detail = venue_detail(&ctx, hop.id).unwrap().unwrap();
    assert_eq!(detail.venue.name, "The Musical Hop");
    assert_eq!(detail.venue.genres, vec![Genre::Jazz, Genre::Folk]);

    assert_eq!(detail.past_shows_count, 1);
    assert_eq!(detail.past_shows[0].artist_id, petals.id);
    assert_eq!(detail.past_shows[0].artist_name, "Guns N Petals");
    assert_eq!(detail.past_shows[0].start_time, "2024-05-29 12:00:00");

    assert_eq!(detail.upcoming_shows_count, 2);
    assert_eq!(detail.upcoming_shows[0].artist_id, sax.id);
    assert_eq!(detail.upcoming_shows[0].start_time, "2024-06-01 14:00:00");
    assert_eq!(
        detail.upcoming_shows[0].artist_image_link,
        sax.image_link
    );
    assert_eq!(detail.upcoming_shows[1].artist_id, petals.id);
}

#[test]
fn detail_for_unknown_venue_is_none() {
    let mut conn = open_db_in_memory().unwrap();
    let ctx = RequestContext::at(&mut conn, fixed_now());

    assert!(venue_detail(&ctx, 404).unwrap().is_none());
    assert!(venue_form(&ctx, 404).unwrap().is_none());
}

#[test]
fn detail_serializes_flat_page_model() {
    let mut conn = open_db_in_memory().unwrap();
    let mut ctx = RequestContext::at(&mut conn, fixed_now());
    let hop = create_venue(&mut ctx, venue("The Musical Hop", "San Francisco", "CA")).unwrap();

    let detail = venue_detail(&ctx, hop.id).unwrap().unwrap();
    let json = serde_json::to_value(&detail).unwrap();
    assert_eq!(json["name"], "The Musical Hop");
    assert_eq!(json["genres"], serde_json::json!(["Jazz", "Folk"]));
    assert_eq!(json["upcoming_shows_count"], 0);
    assert_eq!(json["past_shows"], serde_json::json!([]));
}

#[test]
fn form_prefill_returns_stored_values() {
    let mut conn = open_db_in_memory().unwrap();
    let mut ctx = RequestContext::at(&mut conn, fixed_now());
    let input = VenueInput {
        seeking_talent: true,
        seeking_description: Some("Looking for jazz trios".to_string()),
        genres: vec![Genre::RockNRoll, Genre::RhythmAndBlues],
        ..venue("The Musical Hop", "San Francisco", "CA")
    };
    let created = create_venue(&mut ctx, input.clone()).unwrap();

    let form = venue_form(&ctx, created.id).unwrap().unwrap();
    assert_eq!(form, input);
}
