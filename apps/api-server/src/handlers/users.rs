//! User handlers.

use actix_web::{HttpResponse, web};

use quill_shared::dto::{CreateUserRequest, UserResponse};
use quill_shared::validation;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /user
pub async fn create_user(
    state: web::Data<AppState>,
    body: web::Json<CreateUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate before touching storage
    validation::check(&req)?;

    let session = state.sessions.open().await?;
    let user = session.insert_user(req.into()).await?;
    session.commit().await?;

    tracing::info!(user_id = user.id, "User created");
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}
