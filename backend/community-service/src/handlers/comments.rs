/// Comment handlers - list and create comments on a post
use crate::error::Result;
use crate::models::{CommentListQuery, CreateCommentRequest};
use crate::services::{CommentService, NewComment, Pagination, UserService};
use actix_middleware::UserId;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

/// Get comments for a post
pub async fn list_comments(
    pool: web::Data<PgPool>,
    user_id: UserId,
    post_id: web::Path<Uuid>,
    query: web::Query<CommentListQuery>,
) -> Result<HttpResponse> {
    let page = Pagination::for_comments(&query)?;

    UserService::new((**pool).clone())
        .resolve_caller(user_id.0)
        .await?;
    let comments = CommentService::new((**pool).clone())
        .list_comments(*post_id, page)
        .await?;

    Ok(HttpResponse::Ok().json(comments))
}

/// Create a new comment
pub async fn create_comment(
    pool: web::Data<PgPool>,
    user_id: UserId,
    post_id: web::Path<Uuid>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let new_comment = NewComment::from_request(req.into_inner())?;

    let caller = UserService::new((**pool).clone())
        .resolve_caller(user_id.0)
        .await?;
    let comment = CommentService::new((**pool).clone())
        .create_comment(&caller, *post_id, new_comment)
        .await?;

    Ok(HttpResponse::Created().json(comment))
}
