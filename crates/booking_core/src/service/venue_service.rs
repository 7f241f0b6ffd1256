//! Venue mutations.

use crate::context::RequestContext;
use crate::model::venue::{Venue, VenueId, VenueInput};
use crate::model::EntityKind;
use crate::repo::venue_repo::{SqliteVenueRepository, VenueRepository};
use crate::service::{Mutation, MutationKind, PersistError, PersistFailure};

/// Lists a new venue from submitted form values.
pub fn create_venue(ctx: &mut RequestContext<'_>, input: VenueInput) -> Result<Venue, PersistError> {
    let input = input.normalized();
    let mutation = Mutation::new(
        EntityKind::Venue,
        MutationKind::Create,
        Some(input.name.clone()),
    );
    mutation.check(input.validate())?;
    mutation.run(ctx, move |conn| {
        let id = SqliteVenueRepository::new(conn).insert_venue(&input)?;
        Ok(input.into_venue(id))
    })
}

/// Replaces every mutable field of venue `id` with the submitted values.
pub fn update_venue(
    ctx: &mut RequestContext<'_>,
    id: VenueId,
    input: VenueInput,
) -> Result<Venue, PersistError> {
    let input = input.normalized();
    let mutation = Mutation::new(
        EntityKind::Venue,
        MutationKind::Update,
        Some(input.name.clone()),
    );
    mutation.check(input.validate())?;
    mutation.run(ctx, move |conn| {
        SqliteVenueRepository::new(conn).update_venue(id, &input)?;
        Ok(input.into_venue(id))
    })
}

/// Deletes venue `id` and returns the removed venue's name.
///
/// Refused while any show still references the venue.
pub fn delete_venue(ctx: &mut RequestContext<'_>, id: VenueId) -> Result<String, PersistError> {
    Mutation::new(EntityKind::Venue, MutationKind::Delete, None).run(ctx, |conn| {
        let repo = SqliteVenueRepository::new(conn);
        let name = repo.venue_name(id)?.ok_or(PersistFailure::NotFound(id))?;
        let show_count = repo.count_venue_shows(id)?;
        if show_count > 0 {
            return Err(PersistFailure::Restricted { show_count });
        }
        repo.delete_venue(id)?;
        Ok(name)
    })
}
