use crate::models::{FeedSort, Post, PostView};
use sqlx::PgExecutor;
use uuid::Uuid;

/// Columns of `PostView`, joined for a given viewer bound as `$1`
const POST_VIEW_SELECT: &str = r#"
    SELECT p.id, p.user_id, u.name AS user_name, p.title, p.content, p.score,
           (SELECT COUNT(*) FROM community_post_comments c WHERE c.post_id = p.id) AS comment_count,
           COALESCE(v.vote_value, 0::smallint) AS user_vote,
           p.created_at
    FROM community_posts p
    JOIN users u ON u.id = p.user_id
    LEFT JOIN community_post_votes v ON v.post_id = p.id AND v.user_id = $1
"#;

/// Insert a new post with score 0
pub async fn insert_post<'e, E>(
    executor: E,
    user_id: Uuid,
    title: &str,
    content: &str,
) -> Result<Post, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO community_posts (user_id, title, content)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, title, content, score, created_at
        "#,
    )
    .bind(user_id)
    .bind(title)
    .bind(content)
    .fetch_one(executor)
    .await
}

/// Find a post row by id
pub async fn find_post<'e, E>(executor: E, post_id: Uuid) -> Result<Option<Post>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, user_id, title, content, score, created_at
        FROM community_posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(executor)
    .await
}

/// Check whether a post exists
pub async fn post_exists<'e, E>(executor: E, post_id: Uuid) -> Result<bool, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM community_posts WHERE id = $1)")
        .bind(post_id)
        .fetch_one(executor)
        .await
}

/// Atomically add `delta` to a post's score and return the new score
pub async fn add_to_score<'e, E>(
    executor: E,
    post_id: Uuid,
    delta: i32,
) -> Result<Option<i32>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, i32>(
        r#"
        UPDATE community_posts
        SET score = score + $1
        WHERE id = $2
        RETURNING score
        "#,
    )
    .bind(delta)
    .bind(post_id)
    .fetch_optional(executor)
    .await
}

/// Count all posts
pub async fn count_posts<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM community_posts")
        .fetch_one(executor)
        .await
}

/// One page of the feed as seen by `viewer_id`
pub async fn list_post_views<'e, E>(
    executor: E,
    viewer_id: Uuid,
    sort: FeedSort,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostView>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    // The ORDER BY fragment is a fixed string chosen by `FeedSort`, never user input.
    let sql = format!(
        "{} ORDER BY {} LIMIT $2 OFFSET $3",
        POST_VIEW_SELECT,
        sort.order_by()
    );

    sqlx::query_as::<_, PostView>(&sql)
        .bind(viewer_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await
}

/// A single post as seen by `viewer_id`
pub async fn find_post_view<'e, E>(
    executor: E,
    post_id: Uuid,
    viewer_id: Uuid,
) -> Result<Option<PostView>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let sql = format!("{} WHERE p.id = $2", POST_VIEW_SELECT);

    sqlx::query_as::<_, PostView>(&sql)
        .bind(viewer_id)
        .bind(post_id)
        .fetch_optional(executor)
        .await
}
