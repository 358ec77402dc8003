/// Activity handler - the caller's timeline (or any user's, for admins)
use crate::error::Result;
use crate::models::ActivityQuery;
use crate::services::{ActivityService, Pagination, UserService};
use actix_middleware::UserId;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

pub async fn list_activity(
    pool: web::Data<PgPool>,
    user_id: UserId,
    query: web::Query<ActivityQuery>,
) -> Result<HttpResponse> {
    let page = Pagination::for_activity(&query)?;

    let caller = UserService::new((**pool).clone())
        .resolve_caller(user_id.0)
        .await?;
    let events = ActivityService::new((**pool).clone())
        .list_activity(&caller, query.user_id, page)
        .await?;

    Ok(HttpResponse::Ok().json(events))
}
