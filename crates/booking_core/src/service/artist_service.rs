//! Artist mutations.

use crate::context::RequestContext;
use crate::model::artist::{Artist, ArtistId, ArtistInput};
use crate::model::EntityKind;
use crate::repo::artist_repo::{ArtistRepository, SqliteArtistRepository};
use crate::service::{Mutation, MutationKind, PersistError, PersistFailure};

/// Lists a new artist from submitted form values.
pub fn create_artist(
    ctx: &mut RequestContext<'_>,
    input: ArtistInput,
) -> Result<Artist, PersistError> {
    let input = input.normalized();
    let mutation = Mutation::new(
        EntityKind::Artist,
        MutationKind::Create,
        Some(input.name.clone()),
    );
    mutation.check(input.validate())?;
    mutation.run(ctx, move |conn| {
        let id = SqliteArtistRepository::new(conn).insert_artist(&input)?;
        Ok(input.into_artist(id))
    })
}

/// Full-replace update of artist `id`.
pub fn update_artist(
    ctx: &mut RequestContext<'_>,
    id: ArtistId,
    input: ArtistInput,
) -> Result<Artist, PersistError> {
    let input = input.normalized();
    let mutation = Mutation::new(
        EntityKind::Artist,
        MutationKind::Update,
        Some(input.name.clone()),
    );
    mutation.check(input.validate())?;
    mutation.run(ctx, move |conn| {
        SqliteArtistRepository::new(conn).update_artist(id, &input)?;
        Ok(input.into_artist(id))
    })
}

/// Deletes artist `id` and returns their name; refused while shows reference it.
pub fn delete_artist(ctx: &mut RequestContext<'_>, id: ArtistId) -> Result<String, PersistError> {
    Mutation::new(EntityKind::Artist, MutationKind::Delete, None).run(ctx, |conn| {
        let repo = SqliteArtistRepository::new(conn);
        let name = repo.artist_name(id)?.ok_or(PersistFailure::NotFound(id))?;
        let show_count = repo.count_artist_shows(id)?;
        if show_count > 0 {
            return Err(PersistFailure::Restricted { show_count });
        }
        repo.delete_artist(id)?;
        Ok(name)
    })
}
