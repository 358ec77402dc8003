/// Post handlers - create, list and fetch community posts
use crate::error::Result;
use crate::models::{CreatePostRequest, FeedQuery};
use crate::services::{FeedPage, NewPost, PostService, UserService};
use actix_middleware::UserId;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new post
pub async fn create_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let new_post = NewPost::from_request(req.into_inner())?;

    let caller = UserService::new((**pool).clone())
        .resolve_caller(user_id.0)
        .await?;
    let post = PostService::new((**pool).clone())
        .create_post(&caller, new_post)
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// List the feed
pub async fn list_posts(
    pool: web::Data<PgPool>,
    user_id: UserId,
    query: web::Query<FeedQuery>,
) -> Result<HttpResponse> {
    let page = FeedPage::from_query(&query)?;

    let caller = UserService::new((**pool).clone())
        .resolve_caller(user_id.0)
        .await?;
    let feed = PostService::new((**pool).clone())
        .list_feed(&caller, page)
        .await?;

    Ok(HttpResponse::Ok().json(feed))
}

/// Get a single post
pub async fn get_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let caller = UserService::new((**pool).clone())
        .resolve_caller(user_id.0)
        .await?;
    let post = PostService::new((**pool).clone())
        .get_post(&caller, *post_id)
        .await?;

    Ok(HttpResponse::Ok().json(post))
}
