use crate::models::ActivityEvent;
use sqlx::PgExecutor;
use uuid::Uuid;

/// Append an activity event
pub async fn record_activity<'e, E>(
    executor: E,
    user_id: Uuid,
    activity_type: &str,
    details: Option<serde_json::Value>,
) -> Result<ActivityEvent, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, ActivityEvent>(
        r#"
        INSERT INTO activity_events (user_id, activity_type, details)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, activity_type, details, created_at
        "#,
    )
    .bind(user_id)
    .bind(activity_type)
    .bind(details)
    .fetch_one(executor)
    .await
}

/// Count a user's activity events
pub async fn count_for_user<'e, E>(executor: E, user_id: Uuid) -> Result<i64, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM activity_events WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(executor)
        .await
}

/// A user's activity events, newest first
pub async fn list_for_user<'e, E>(
    executor: E,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<ActivityEvent>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, ActivityEvent>(
        r#"
        SELECT id, user_id, activity_type, details, created_at
        FROM activity_events
        WHERE user_id = $1
        ORDER BY created_at DESC, id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(executor)
    .await
}
