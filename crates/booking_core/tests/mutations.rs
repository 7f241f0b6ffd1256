use booking_core::db::open_db_in_memory;
use booking_core::{
    create_artist, create_show, create_venue, delete_artist, delete_show, delete_venue,
    success_notice, update_artist, update_show, update_venue, venue_detail, ArtistInput,
    EntityKind, Genre, MutationKind, PersistFailure, RepoError, RequestContext, ShowInput,
    ValidationError, VenueInput,
};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rusqlite::Connection;

fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn venue(name: &str) -> VenueInput {
    VenueInput {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        address: "1015 Folsom Street".to_string(),
        phone: Some("123-123-1234".to_string()),
        genres: vec![Genre::Jazz, Genre::Reggae, Genre::Folk],
        website_link: Some("https://www.themusicalhop.com".to_string()),
        ..VenueInput::default()
    }
}

fn artist(name: &str) -> ArtistInput {
    ArtistInput {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        genres: vec![Genre::RockNRoll],
        ..ArtistInput::default()
    }
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

#[test]
fn create_venue_persists_record_and_reports_listed_notice() {
    let mut conn = open_db_in_memory().unwrap();
    let mut ctx = RequestContext::at(&mut conn, fixed_now());

    let created = create_venue(&mut ctx, venue("The Musical Hop")).unwrap();
    assert!(created.id > 0);
    assert_eq!(
        success_notice(EntityKind::Venue, MutationKind::Create, Some(&created.name)),
        "Venue The Musical Hop was successfully listed!"
    );

    let stored: (String, String) = ctx
        .conn()
        .query_row(
            "SELECT name, genres FROM venue WHERE id = ?1;",
            [created.id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(stored.0, "The Musical Hop");
    assert_eq!(stored.1, "Jazz, Reggae, Folk");
    assert!(ctx.conn().is_autocommit());
}

#[test]
fn create_trims_fields_and_drops_description_when_not_seeking() {
    let mut conn = open_db_in_memory().unwrap();
    let mut ctx = RequestContext::at(&mut conn, fixed_now());
    let input = ArtistInput {
        name: "  Matt Quevedo ".to_string(),
        phone: Some("   ".to_string()),
        seeking_venue: false,
        seeking_description: Some("Would love a residency".to_string()),
        ..artist("ignored")
    };

    let created = create_artist(&mut ctx, input).unwrap();
    assert_eq!(created.name, "Matt Quevedo");
    assert_eq!(created.phone, None);
    assert!(!created.seeking_venue);
    assert_eq!(created.seeking_description, None);
}

#[test]
fn invalid_input_is_rejected_before_any_write() {
    let mut conn = open_db_in_memory().unwrap();
    let mut ctx = RequestContext::at(&mut conn, fixed_now());
    let input = VenueInput {
        seeking_talent: true,
        seeking_description: None,
        ..venue("The Musical Hop")
    };

    let err = create_venue(&mut ctx, input).unwrap_err();
    assert!(matches!(
        err.failure,
        PersistFailure::Invalid(ValidationError::MissingSeekingDescription)
    ));
    assert_eq!(
        err.notice(),
        "An error occurred. Venue The Musical Hop could not be listed."
    );
    assert_eq!(count(ctx.conn(), "venue"), 0);
}

#[test]
fn bad_link_is_rejected() {
    let mut conn = open_db_in_memory().unwrap();
    let mut ctx = RequestContext::at(&mut conn, fixed_now());
    let input = ArtistInput {
        facebook_link: Some("facebook.com/gunsnpetals".to_string()),
        ..artist("Guns N Petals")
    };

    let err = create_artist(&mut ctx, input).unwrap_err();
    match err.failure {
        PersistFailure::Invalid(ValidationError::InvalidLink { field, .. }) => {
            assert_eq!(field, "facebook_link");
        }
        other => panic!("unexpected failure: {other}"),
    }
}

#[test]
fn storage_failure_rolls_back_and_releases_session() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_broken_band
         BEFORE INSERT ON artist
         WHEN NEW.name = 'Broken Band'
         BEGIN
             SELECT RAISE(ABORT, 'rejected');
         END;",
    )
    .unwrap();
    let mut ctx = RequestContext::at(&mut conn, fixed_now());

    let err = create_artist(&mut ctx, artist("Broken Band")).unwrap_err();
    match &err.failure {
        PersistFailure::Repo(RepoError::Db(db_err)) => {
            assert!(db_err.is_constraint_violation());
        }
        other => panic!("unexpected failure: {other}"),
    }
    assert_eq!(
        err.notice(),
        "An error occurred. Artist Broken Band could not be listed."
    );
    assert!(!err.notice().contains("rejected"));
    assert!(ctx.conn().is_autocommit());
    assert_eq!(count(ctx.conn(), "artist"), 0);

    // The same context keeps working after the rollback.
    create_artist(&mut ctx, artist("Guns N Petals")).unwrap();
    assert_eq!(count(ctx.conn(), "artist"), 1);
}

#[test]
fn update_replaces_every_mutable_field() {
    let mut conn = open_db_in_memory().unwrap();
    let mut ctx = RequestContext::at(&mut conn, fixed_now());
    let created = create_venue(&mut ctx, venue("The Musical Hop")).unwrap();

    let replacement = VenueInput {
        name: "The Musical Hop II".to_string(),
        city: "Oakland".to_string(),
        phone: None,
        genres: vec![Genre::Blues],
        website_link: None,
        seeking_talent: true,
        seeking_description: Some("Open mic on Mondays".to_string()),
        ..venue("unused")
    };
    let updated = update_venue(&mut ctx, created.id, replacement).unwrap();
    assert_eq!(updated.id, created.id);

    let detail = venue_detail(&ctx, created.id).unwrap().unwrap();
    assert_eq!(detail.venue, updated);
    assert_eq!(detail.venue.city, "Oakland");
    assert_eq!(detail.venue.phone, None);
    assert_eq!(detail.venue.genres, vec![Genre::Blues]);
    assert_eq!(
        detail.venue.seeking_description.as_deref(),
        Some("Open mic on Mondays")
    );
}

#[test]
fn update_of_missing_record_reports_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let mut ctx = RequestContext::at(&mut conn, fixed_now());

    let err = update_artist(&mut ctx, 77, artist("Nobody")).unwrap_err();
    assert!(matches!(err.failure, PersistFailure::NotFound(77)));
    assert_eq!(
        err.notice(),
        "An error occurred. Artist Nobody could not be updated."
    );
    assert!(ctx.conn().is_autocommit());
}

#[test]
fn delete_removes_the_requested_record_only() {
    let mut conn = open_db_in_memory().unwrap();
    let mut ctx = RequestContext::at(&mut conn, fixed_now());
    let first = create_artist(&mut ctx, artist("Guns N Petals")).unwrap();
    let second = create_artist(&mut ctx, artist("Matt Quevedo")).unwrap();

    let removed = delete_artist(&mut ctx, second.id).unwrap();
    assert_eq!(removed, "Matt Quevedo");

    let remaining: Vec<i64> = {
        let mut stmt = ctx.conn().prepare("SELECT id FROM artist;").unwrap();
        let ids = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<i64>, _>>()
            .unwrap();
        ids
    };
    assert_eq!(remaining, vec![first.id]);
}

#[test]
fn delete_of_missing_record_reports_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let mut ctx = RequestContext::at(&mut conn, fixed_now());

    let err = delete_venue(&mut ctx, 5).unwrap_err();
    assert!(matches!(err.failure, PersistFailure::NotFound(5)));
    assert_eq!(err.notice(), "An error occurred. Venue could not be deleted.");
}

#[test]
fn rows_with_undecodable_genres_can_be_repaired_or_removed() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO venue (id, name, city, state, address, genres)
         VALUES (1, 'Park Square Live Music & Coffee', 'San Francisco', 'CA',
                 '34 Whiskey Moore Ave', 'Polka');
         INSERT INTO artist (id, name, city, state, genres)
         VALUES (1, 'The Wild Sax Band', 'San Francisco', 'CA', 'Polka');",
    )
    .unwrap();
    let mut ctx = RequestContext::at(&mut conn, fixed_now());
    assert!(matches!(
        venue_detail(&ctx, 1).unwrap_err(),
        RepoError::InvalidData(_)
    ));

    let repaired = update_artist(&mut ctx, 1, artist("The Wild Sax Band")).unwrap();
    assert_eq!(repaired.genres, vec![Genre::RockNRoll]);
    let genres: String = ctx
        .conn()
        .query_row("SELECT genres FROM artist WHERE id = 1;", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(genres, "Rock n Roll");

    let removed = delete_venue(&mut ctx, 1).unwrap();
    assert_eq!(removed, "Park Square Live Music & Coffee");
    assert_eq!(count(ctx.conn(), "venue"), 0);
}

#[test]
fn delete_is_restricted_while_shows_reference_the_record() {
    let mut conn = open_db_in_memory().unwrap();
    let mut ctx = RequestContext::at(&mut conn, fixed_now());
    let hop = create_venue(&mut ctx, venue("The Musical Hop")).unwrap();
    let petals = create_artist(&mut ctx, artist("Guns N Petals")).unwrap();
    let show = create_show(
        &mut ctx,
        ShowInput {
            venue_id: hop.id,
            artist_id: petals.id,
            start_time: fixed_now() + Duration::days(2),
        },
    )
    .unwrap();

    let venue_err = delete_venue(&mut ctx, hop.id).unwrap_err();
    assert!(matches!(
        venue_err.failure,
        PersistFailure::Restricted { show_count: 1 }
    ));
    let artist_err = delete_artist(&mut ctx, petals.id).unwrap_err();
    assert!(matches!(
        artist_err.failure,
        PersistFailure::Restricted { show_count: 1 }
    ));
    assert_eq!(count(ctx.conn(), "venue"), 1);
    assert_eq!(count(ctx.conn(), "artist"), 1);

    delete_show(&mut ctx, show.id).unwrap();
    delete_venue(&mut ctx, hop.id).unwrap();
    delete_artist(&mut ctx, petals.id).unwrap();
    assert_eq!(count(ctx.conn(), "show"), 0);
    assert_eq!(count(ctx.conn(), "venue"), 0);
}

#[test]
fn show_with_unknown_reference_fails_and_rolls_back() {
    let mut conn = open_db_in_memory().unwrap();
    let mut ctx = RequestContext::at(&mut conn, fixed_now());
    let hop = create_venue(&mut ctx, venue("The Musical Hop")).unwrap();

    let err = create_show(
        &mut ctx,
        ShowInput {
            venue_id: hop.id,
            artist_id: 999,
            start_time: fixed_now(),
        },
    )
    .unwrap_err();
    match &err.failure {
        PersistFailure::Repo(RepoError::Db(db_err)) => {
            assert!(db_err.is_constraint_violation());
        }
        other => panic!("unexpected failure: {other}"),
    }
    assert_eq!(err.notice(), "An error occurred. Show could not be listed.");
    assert_eq!(count(ctx.conn(), "show"), 0);
    assert!(ctx.conn().is_autocommit());
}

#[test]
fn show_with_non_positive_reference_is_invalid() {
    let mut conn = open_db_in_memory().unwrap();
    let mut ctx = RequestContext::at(&mut conn, fixed_now());

    let err = create_show(
        &mut ctx,
        ShowInput {
            venue_id: 0,
            artist_id: 1,
            start_time: fixed_now(),
        },
    )
    .unwrap_err();
    assert!(matches!(
        err.failure,
        PersistFailure::Invalid(ValidationError::InvalidReference { field: "venue_id", .. })
    ));
}

#[test]
fn update_show_moves_it_between_buckets() {
    let mut conn = open_db_in_memory().unwrap();
    let mut ctx = RequestContext::at(&mut conn, fixed_now());
    let hop = create_venue(&mut ctx, venue("The Musical Hop")).unwrap();
    let petals = create_artist(&mut ctx, artist("Guns N Petals")).unwrap();
    let show = create_show(
        &mut ctx,
        ShowInput {
            venue_id: hop.id,
            artist_id: petals.id,
            start_time: fixed_now() - Duration::days(1),
        },
    )
    .unwrap();

    let before = venue_detail(&ctx, hop.id).unwrap().unwrap();
    assert_eq!(before.past_shows_count, 1);
    assert_eq!(before.upcoming_shows_count, 0);

    update_show(
        &mut ctx,
        show.id,
        ShowInput {
            venue_id: hop.id,
            artist_id: petals.id,
            start_time: fixed_now() + Duration::days(1),
        },
    )
    .unwrap();

    let after = venue_detail(&ctx, hop.id).unwrap().unwrap();
    assert_eq!(after.past_shows_count, 0);
    assert_eq!(after.upcoming_shows_count, 1);
}
