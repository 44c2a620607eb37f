//! Post handlers.

use actix_web::{HttpResponse, web};

use quill_core::DomainError;
use quill_shared::dto::{CreatePostRequest, PostResponse};
use quill_shared::validation;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validation::check(&req)?;

    let session = state.sessions.open().await?;

    // The session is dropped (and rolled back) on this early return.
    if session.find_user(req.author_id).await?.is_none() {
        tracing::debug!(author_id = req.author_id, "Rejected post for unknown author");
        return Err(DomainError::author_not_found(req.author_id).into());
    }

    let post = session.insert_post(req.into()).await?;
    session.commit().await?;

    tracing::info!(post_id = post.id, author_id = post.author_id, "Post created");
    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// GET /posts/
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let session = state.sessions.open().await?;
    let posts: Vec<PostResponse> = session
        .list_posts()
        .await?
        .into_iter()
        .map(PostResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(posts))
}
