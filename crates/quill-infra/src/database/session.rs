//! SeaORM-backed storage sessions.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseTransaction, DbConn, DbErr, EntityTrait, QueryOrder,
    TransactionTrait,
};

use quill_core::domain::{NewPost, NewUser, Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{Session, SessionFactory};

use super::connections::{DatabaseConfig, connect};
use super::entity::{post, user};
use super::schema::ensure_schema;

/// Session factory over a single shared connection pool.
pub struct SqlSessionFactory {
    db: DbConn,
}

impl SqlSessionFactory {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Connect to the configured database and make sure the schema exists.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let db = connect(config).await?;
        ensure_schema(&db).await?;
        Ok(Self::new(db))
    }

    pub fn connection(&self) -> &DbConn {
        &self.db
    }
}

#[async_trait]
impl SessionFactory for SqlSessionFactory {
    async fn open(&self) -> Result<Box<dyn Session>, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        tracing::trace!("Storage session opened");
        Ok(Box::new(SqlSession::new(txn)))
    }
}

/// One database transaction.
///
/// Dropping an uncommitted session rolls the transaction back and hands the
/// connection back to the pool.
pub struct SqlSession {
    txn: Option<DatabaseTransaction>,
    opened_at: Instant,
    committed: bool,
}

impl SqlSession {
    fn new(txn: DatabaseTransaction) -> Self {
        Self {
            txn: Some(txn),
            opened_at: Instant::now(),
            committed: false,
        }
    }

    fn txn(&self) -> Result<&DatabaseTransaction, RepoError> {
        self.txn
            .as_ref()
            .ok_or_else(|| RepoError::Connection("session already released".to_string()))
    }
}

impl Drop for SqlSession {
    fn drop(&mut self) {
        tracing::trace!(
            committed = self.committed,
            held_ms = held_ms(self.opened_at.elapsed()),
            "Storage session released"
        );
    }
}

#[async_trait]
impl Session for SqlSession {
    async fn insert_user(&self, user: NewUser) -> Result<User, RepoError> {
        let model = user::ActiveModel::from(user)
            .insert(self.txn()?)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(user_id = model.id, "User inserted");
        Ok(model.into())
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, RepoError> {
        let result = user::Entity::find_by_id(id)
            .one(self.txn()?)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert_post(&self, post: NewPost) -> Result<Post, RepoError> {
        let txn = self.txn()?;
        let model = post::ActiveModel::from(post)
            .insert(txn)
            .await
            .map_err(map_db_err)?;

        // Reload through the join so the author comes back with the post.
        let (post, author) = post::Entity::find_by_id(model.id)
            .find_also_related(user::Entity)
            .one(txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        tracing::debug!(post_id = post.id, author_id = post.author_id, "Post inserted");
        resolve(post, author)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, RepoError> {
        let rows = post::Entity::find()
            .find_also_related(user::Entity)
            .order_by_asc(post::Column::Id)
            .all(self.txn()?)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(count = rows.len(), "Posts loaded");
        rows.into_iter()
            .map(|(post, author)| resolve(post, author))
            .collect()
    }

    async fn commit(mut self: Box<Self>) -> Result<(), RepoError> {
        if let Some(txn) = self.txn.take() {
            txn.commit().await.map_err(map_db_err)?;
            self.committed = true;
        }
        Ok(())
    }
}

/// Whole milliseconds in `elapsed`, saturating at `u64::MAX`.
fn held_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

fn resolve(post: post::Model, author: Option<user::Model>) -> Result<Post, RepoError> {
    match author {
        Some(author) => Ok(post.into_domain(author)),
        None => Err(RepoError::Constraint(format!(
            "post {} references missing author {}",
            post.id, post.author_id
        ))),
    }
}

pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => RepoError::Connection(err.to_string()),
        DbErr::RecordNotFound(_) => RepoError::NotFound,
        other => {
            let err_str = other.to_string();
            if err_str.contains("constraint failed") {
                RepoError::Constraint(err_str)
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}
