//! Storage session ports.

use async_trait::async_trait;

use crate::domain::{NewPost, NewUser, Post, User};
use crate::error::RepoError;

/// Process-wide source of storage sessions.
///
/// Implementations hold an immutable connection handle created at startup;
/// opening a session never mutates the factory itself.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    /// Open a new session bound to the caller (usually one HTTP request).
    async fn open(&self) -> Result<Box<dyn Session>, RepoError>;
}

/// A short-lived unit of work against storage.
///
/// Writes become visible to other sessions only after [`Session::commit`].
/// Dropping a session without committing discards its writes and releases
/// the underlying connection.
#[async_trait]
pub trait Session: Send + Sync {
    /// Insert a user and return it reloaded with its generated id.
    async fn insert_user(&self, user: NewUser) -> Result<User, RepoError>;

    /// Look up a user by id.
    async fn find_user(&self, id: i64) -> Result<Option<User>, RepoError>;

    /// Insert a post and return it reloaded with its author resolved.
    ///
    /// Callers check that the author exists first.
    async fn insert_post(&self, post: NewPost) -> Result<Post, RepoError>;

    /// All posts in primary key order, each joined with its author.
    async fn list_posts(&self) -> Result<Vec<Post>, RepoError>;

    /// Commit the session's writes and release it.
    async fn commit(self: Box<Self>) -> Result<(), RepoError>;
}
