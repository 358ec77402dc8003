/// Vote handler - set, flip or clear the caller's vote on a post
use crate::error::Result;
use crate::models::VoteRequest;
use crate::services::{UserService, VoteService, VoteValue};
use actix_middleware::UserId;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

/// Cast a vote (-1, 0 or 1)
pub async fn cast_vote(
    pool: web::Data<PgPool>,
    user_id: UserId,
    post_id: web::Path<Uuid>,
    req: web::Json<VoteRequest>,
) -> Result<HttpResponse> {
    let value = VoteValue::try_from(req.value)?;

    let caller = UserService::new((**pool).clone())
        .resolve_caller(user_id.0)
        .await?;
    let post = VoteService::new((**pool).clone())
        .cast_vote(&caller, *post_id, value)
        .await?;

    Ok(HttpResponse::Ok().json(post))
}
