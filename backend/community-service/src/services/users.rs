/// Resolution of the authenticated caller to a user row
use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::models::User;
use sqlx::PgPool;
use uuid::Uuid;

pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the user behind a validated token subject.
    ///
    /// A token for a user that no longer exists is treated as unauthenticated.
    pub async fn resolve_caller(&self, user_id: Uuid) -> Result<User> {
        user_repo::find_user(&self.pool, user_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(%user_id, "Token subject has no user row");
                AppError::Unauthorized("User not found".to_string())
            })
    }
}
