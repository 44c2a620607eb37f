use serde::{Deserialize, Serialize};

use super::User;

/// Post entity - a blog post with its author resolved.
///
/// `author.id` always equals `author_id`; posts are only ever read back
/// joined with the user they reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub author_id: i64,
    pub author: User,
}

/// A post that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub author_id: i64,
}

impl NewPost {
    pub fn new(title: impl Into<String>, body: impl Into<String>, author_id: i64) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            author_id,
        }
    }
}
