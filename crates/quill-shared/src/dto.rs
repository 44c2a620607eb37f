//! Data Transfer Objects - request/response types for the API.
//!
//! Request shapes expose only user-settable fields; response shapes add the
//! generated ids and resolved relationships.

use serde::{Deserialize, Serialize};
use validator::Validate;

use quill_core::domain::{NewPost, NewUser, Post, User};

/// Request to create a user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// The user's full name.
    #[validate(length(min = 2, max = 25, message = "name must be between 2 and 25 characters"))]
    pub name: String,
    /// The user's age in years.
    #[validate(range(min = 5, max = 111, message = "age must be between 5 and 111"))]
    pub age: i32,
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        NewUser::new(req.name, req.age)
    }
}

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub age: i32,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            age: user.age,
        }
    }
}

/// Request to create a post.
///
/// `author_id` is not checked here; the handler resolves it against storage.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePostRequest {
    pub title: String,
    pub body: String,
    pub author_id: i64,
}

impl From<CreatePostRequest> for NewPost {
    fn from(req: CreatePostRequest) -> Self {
        NewPost::new(req.title, req.body, req.author_id)
    }
}

/// A stored post with its author embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub author_id: i64,
    pub author: UserResponse,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            body: post.body,
            author_id: post.author_id,
            author: post.author.into(),
        }
    }
}
