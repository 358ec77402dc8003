/// Comment service - one-level comment threads on community posts
use crate::db::{activity_repo, comment_repo, post_repo};
use crate::error::{AppError, Result};
use crate::metrics::community::COMMENTS_CREATED_TOTAL;
use crate::models::{
    truncate_chars, CommentView, CreateCommentRequest, Page, User, ACTIVITY_COMMENT_CREATED,
};
use crate::services::Pagination;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const COMMENT_PREVIEW_CHARS: usize = 120;

/// A validated comment ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub content: String,
    pub parent_comment_id: Option<Uuid>,
}

impl NewComment {
    pub fn from_request(req: CreateCommentRequest) -> Result<Self> {
        let req = req.normalized();
        if req.content.is_empty() {
            return Err(AppError::Validation(
                "Comment cannot be empty".to_string(),
            ));
        }
        req.validate()?;

        Ok(Self {
            content: req.content,
            parent_comment_id: req.parent_comment_id,
        })
    }
}

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Comments on a post, oldest first
    pub async fn list_comments(
        &self,
        post_id: Uuid,
        page: Pagination,
    ) -> Result<Page<CommentView>> {
        if !post_repo::post_exists(&self.pool, post_id).await? {
            return Err(AppError::NotFound("Post not found".to_string()));
        }

        let total = comment_repo::count_comments(&self.pool, post_id).await?;
        let items =
            comment_repo::list_comment_views(&self.pool, post_id, page.limit, page.offset).await?;

        Ok(Page::new(total, items))
    }

    /// Create a comment or a reply to a top-level comment on the same post
    pub async fn create_comment(
        &self,
        author: &User,
        post_id: Uuid,
        new_comment: NewComment,
    ) -> Result<CommentView> {
        let mut tx = self.pool.begin().await?;

        if !post_repo::post_exists(&mut *tx, post_id).await? {
            return Err(AppError::NotFound("Post not found".to_string()));
        }

        if let Some(parent_id) = new_comment.parent_comment_id {
            let parent = comment_repo::find_comment(&mut *tx, parent_id)
                .await?
                .filter(|parent| parent.post_id == post_id)
                .ok_or_else(|| AppError::BadRequest("Invalid parent comment".to_string()))?;

            if parent.parent_comment_id.is_some() {
                return Err(AppError::BadRequest(
                    "Replies can only be added to top-level comments".to_string(),
                ));
            }
        }

        let comment = comment_repo::insert_comment(
            &mut *tx,
            post_id,
            author.id,
            new_comment.parent_comment_id,
            &new_comment.content,
        )
        .await?;

        activity_repo::record_activity(
            &mut *tx,
            author.id,
            ACTIVITY_COMMENT_CREATED,
            Some(json!({
                "post_id": post_id,
                "comment_id": comment.id,
                "content_preview": truncate_chars(&comment.content, COMMENT_PREVIEW_CHARS),
            })),
        )
        .await?;

        tx.commit().await?;

        let kind = if comment.parent_comment_id.is_some() {
            "reply"
        } else {
            "top_level"
        };
        COMMENTS_CREATED_TOTAL.with_label_values(&[kind]).inc();
        tracing::info!(
            %post_id,
            comment_id = %comment.id,
            user_id = %author.id,
            kind,
            "Community comment created"
        );

        Ok(CommentView {
            id: comment.id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            user_name: author.name.clone(),
            parent_comment_id: comment.parent_comment_id,
            content: comment.content,
            created_at: comment.created_at,
        })
    }
}
