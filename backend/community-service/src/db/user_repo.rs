use crate::models::User;
use sqlx::PgExecutor;
use uuid::Uuid;

/// Find a user by id
pub async fn find_user<'e, E>(executor: E, user_id: Uuid) -> Result<Option<User>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, is_admin, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
}
