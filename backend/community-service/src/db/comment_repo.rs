use crate::models::{Comment, CommentView};
use sqlx::PgExecutor;
use uuid::Uuid;

/// Find a comment row by id
pub async fn find_comment<'e, E>(
    executor: E,
    comment_id: Uuid,
) -> Result<Option<Comment>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, user_id, parent_comment_id, content, created_at
        FROM community_post_comments
        WHERE id = $1
        "#,
    )
    .bind(comment_id)
    .fetch_optional(executor)
    .await
}

/// Insert a comment
pub async fn insert_comment<'e, E>(
    executor: E,
    post_id: Uuid,
    user_id: Uuid,
    parent_comment_id: Option<Uuid>,
    content: &str,
) -> Result<Comment, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO community_post_comments (post_id, user_id, parent_comment_id, content)
        VALUES ($1, $2, $3, $4)
        RETURNING id, post_id, user_id, parent_comment_id, content, created_at
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .bind(parent_comment_id)
    .bind(content)
    .fetch_one(executor)
    .await
}

/// Count comments on a post
pub async fn count_comments<'e, E>(executor: E, post_id: Uuid) -> Result<i64, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM community_post_comments WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(executor)
        .await
}

/// Comments on a post with author names, oldest first
pub async fn list_comment_views<'e, E>(
    executor: E,
    post_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<CommentView>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, CommentView>(
        r#"
        SELECT c.id, c.post_id, c.user_id, u.name AS user_name, c.parent_comment_id,
               c.content, c.created_at
        FROM community_post_comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.post_id = $1
        ORDER BY c.created_at ASC, c.id ASC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(post_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(executor)
    .await
}
