//! Show mutations.
//!
//! Venue and artist references are enforced by the schema's foreign keys; a
//! dangling reference surfaces as a storage failure and rolls back.

use crate::context::RequestContext;
use crate::model::show::{Show, ShowId, ShowInput};
use crate::model::EntityKind;
use crate::repo::show_repo::{ShowRepository, SqliteShowRepository};
use crate::service::{Mutation, MutationKind, PersistError};

pub fn create_show(ctx: &mut RequestContext<'_>, input: ShowInput) -> Result<Show, PersistError> {
    let mutation = Mutation::new(EntityKind::Show, MutationKind::Create, None);
    mutation.check(input.validate())?;
    mutation.run(ctx, move |conn| {
        let id = SqliteShowRepository::new(conn).insert_show(&input)?;
        Ok(input.into_show(id))
    })
}

pub fn update_show(
    ctx: &mut RequestContext<'_>,
    id: ShowId,
    input: ShowInput,
) -> Result<Show, PersistError> {
    let mutation = Mutation::new(EntityKind::Show, MutationKind::Update, None);
    mutation.check(input.validate())?;
    mutation.run(ctx, move |conn| {
        SqliteShowRepository::new(conn).update_show(id, &input)?;
        Ok(input.into_show(id))
    })
}

pub fn delete_show(ctx: &mut RequestContext<'_>, id: ShowId) -> Result<(), PersistError> {
    Mutation::new(EntityKind::Show, MutationKind::Delete, None).run(ctx, |conn| {
        SqliteShowRepository::new(conn).delete_show(id)?;
        Ok(())
    })
}
