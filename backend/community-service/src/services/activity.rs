/// Activity service - per-user activity timeline
use crate::db::activity_repo;
use crate::error::Result;
use crate::models::{ActivityEvent, Page, User};
use crate::services::Pagination;
use sqlx::PgPool;
use uuid::Uuid;

/// Whose timeline `caller` reads when asking for `requested`.
///
/// Admins may read anyone's timeline; everyone else always gets their own.
pub fn timeline_owner(caller: &User, requested: Option<Uuid>) -> Uuid {
    match requested {
        Some(user_id) if caller.is_admin => user_id,
        _ => caller.id,
    }
}

pub struct ActivityService {
    pool: PgPool,
}

impl ActivityService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Activity events, newest first
    pub async fn list_activity(
        &self,
        caller: &User,
        requested_user: Option<Uuid>,
        page: Pagination,
    ) -> Result<Page<ActivityEvent>> {
        let owner = timeline_owner(caller, requested_user);
        if owner != caller.id {
            tracing::info!(admin_id = %caller.id, user_id = %owner, "Admin reading activity timeline");
        }

        let total = activity_repo::count_for_user(&self.pool, owner).await?;
        let items = activity_repo::list_for_user(&self.pool, owner, page.limit, page.offset).await?;

        Ok(Page::new(total, items))
    }
}
