//! Startup schema bootstrap.

use sea_orm::{ConnectionTrait, DbErr, EntityTrait, Schema};

use super::entity::{post, user};

/// Create the `users` and `posts` tables and their indexes if absent.
///
/// Safe to run on every start; existing tables and data are left untouched.
/// `users` goes first so the foreign key on `posts` has a target.
pub async fn ensure_schema<C>(db: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    create_table(db, user::Entity).await?;
    create_table(db, post::Entity).await?;
    tracing::debug!("Schema ensured");
    Ok(())
}

async fn create_table<C, E>(db: &C, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut table = schema.create_table_from_entity(entity);
    table.if_not_exists();
    db.execute(backend.build(&table)).await?;

    for mut index in schema.create_index_from_entity(entity) {
        index.if_not_exists();
        db.execute(backend.build(&index)).await?;
    }

    Ok(())
}
