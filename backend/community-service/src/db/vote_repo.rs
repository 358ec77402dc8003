use crate::models::PostVote;
use sqlx::PgExecutor;
use uuid::Uuid;

/// Lock and return the caller's vote row on a post, if any.
///
/// Must run inside a transaction for the row lock to be meaningful.
pub async fn find_vote_for_update<'e, E>(
    executor: E,
    post_id: Uuid,
    user_id: Uuid,
) -> Result<Option<PostVote>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, PostVote>(
        r#"
        SELECT id, post_id, user_id, vote_value, created_at, updated_at
        FROM community_post_votes
        WHERE post_id = $1 AND user_id = $2
        FOR UPDATE
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

/// Insert a first vote. Returns `None` when a concurrent request inserted the
/// row first (the unique `(post_id, user_id)` constraint absorbed the insert).
pub async fn insert_vote_if_absent<'e, E>(
    executor: E,
    post_id: Uuid,
    user_id: Uuid,
    value: i16,
) -> Result<Option<PostVote>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, PostVote>(
        r#"
        INSERT INTO community_post_votes (post_id, user_id, vote_value)
        VALUES ($1, $2, $3)
        ON CONFLICT ON CONSTRAINT uq_post_vote_user DO NOTHING
        RETURNING id, post_id, user_id, vote_value, created_at, updated_at
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .bind(value)
    .fetch_optional(executor)
    .await
}

/// Change the value of an existing vote
pub async fn update_vote_value<'e, E>(
    executor: E,
    vote_id: Uuid,
    value: i16,
) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        UPDATE community_post_votes
        SET vote_value = $1, updated_at = NOW()
        WHERE id = $2
        "#,
    )
    .bind(value)
    .bind(vote_id)
    .execute(executor)
    .await?;

    Ok(())
}

/// Remove a vote row
pub async fn delete_vote<'e, E>(executor: E, vote_id: Uuid) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query("DELETE FROM community_post_votes WHERE id = $1")
        .bind(vote_id)
        .execute(executor)
        .await?;

    Ok(())
}

/// Sum of all vote values on a post (what `community_posts.score` must equal)
pub async fn sum_votes<'e, E>(executor: E, post_id: Uuid) -> Result<i64, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(vote_value), 0)::BIGINT FROM community_post_votes WHERE post_id = $1",
    )
    .bind(post_id)
    .fetch_one(executor)
    .await
}
