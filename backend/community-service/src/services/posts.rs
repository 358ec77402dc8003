/// Post service - post creation, feed listing and single-post views
use crate::db::{activity_repo, post_repo};
use crate::error::{AppError, Result};
use crate::metrics::community::POSTS_CREATED_TOTAL;
use crate::models::{
    requests::POST_TITLE_MAX_CHARS, truncate_chars, CreatePostRequest, FeedQuery, FeedSort, Page,
    PostView, User, ACTIVITY_POST_CREATED,
};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub const UNTITLED_POST: &str = "Untitled post";

const POST_PREVIEW_CHARS: usize = 160;

/// Title stored for a post: the given title, else the first non-empty line of
/// the content, else `Untitled post`. Always at most 220 characters.
pub fn build_title(title: &str, content: &str) -> String {
    let title = title.trim();
    if !title.is_empty() {
        return truncate_chars(title, POST_TITLE_MAX_CHARS).to_string();
    }

    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| truncate_chars(line, POST_TITLE_MAX_CHARS).to_string())
        .unwrap_or_else(|| UNTITLED_POST.to_string())
}

/// A validated post ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

impl NewPost {
    pub fn from_request(req: CreatePostRequest) -> Result<Self> {
        let req = req.normalized();
        if req.content.is_empty() {
            return Err(AppError::Validation(
                "Post content cannot be empty".to_string(),
            ));
        }
        req.validate()?;

        Ok(Self {
            title: build_title(&req.title, &req.content),
            content: req.content,
        })
    }
}

/// A validated feed page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedPage {
    pub sort: FeedSort,
    pub limit: i64,
    pub offset: i64,
}

impl FeedPage {
    pub fn from_query(query: &FeedQuery) -> Result<Self> {
        query.validate()?;
        let sort = match query.sort.as_deref() {
            None => FeedSort::default(),
            Some(raw) => raw.parse().map_err(AppError::Validation)?,
        };

        Ok(Self {
            sort,
            limit: query.limit(),
            offset: query.offset(),
        })
    }
}

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a post and record `community_post_created` in the same transaction
    pub async fn create_post(&self, author: &User, new_post: NewPost) -> Result<PostView> {
        let mut tx = self.pool.begin().await?;

        let post =
            post_repo::insert_post(&mut *tx, author.id, &new_post.title, &new_post.content).await?;

        activity_repo::record_activity(
            &mut *tx,
            author.id,
            ACTIVITY_POST_CREATED,
            Some(json!({
                "post_id": post.id,
                "title": post.title,
                "content_preview": truncate_chars(&post.content, POST_PREVIEW_CHARS),
            })),
        )
        .await?;

        tx.commit().await?;

        POSTS_CREATED_TOTAL.inc();
        tracing::info!(post_id = %post.id, user_id = %author.id, "Community post created");

        Ok(PostView {
            id: post.id,
            user_id: post.user_id,
            user_name: author.name.clone(),
            title: post.title,
            content: post.content,
            score: post.score,
            comment_count: 0,
            user_vote: 0,
            created_at: post.created_at,
        })
    }

    /// One page of the feed with the viewer's own votes
    pub async fn list_feed(&self, viewer: &User, page: FeedPage) -> Result<Page<PostView>> {
        let total = post_repo::count_posts(&self.pool).await?;
        let items =
            post_repo::list_post_views(&self.pool, viewer.id, page.sort, page.limit, page.offset)
                .await?;

        tracing::debug!(
            sort = page.sort.as_str(),
            limit = page.limit,
            offset = page.offset,
            returned = items.len(),
            "Feed page loaded"
        );

        Ok(Page::new(total, items))
    }

    /// A single post as seen by `viewer`
    pub async fn get_post(&self, viewer: &User, post_id: Uuid) -> Result<PostView> {
        post_repo::find_post_view(&self.pool, post_id, viewer.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
    }
}
