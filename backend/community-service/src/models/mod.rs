/// Data models for community-service
///
/// Row types map one-to-one onto the community tables. View types are the
/// joined shapes returned to clients.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

pub mod requests;

pub use requests::{
    ActivityQuery, CommentListQuery, CreateCommentRequest, CreatePostRequest, FeedQuery,
    VoteRequest,
};

/// Activity tag recorded when a post is created
pub const ACTIVITY_POST_CREATED: &str = "community_post_created";
/// Activity tag recorded when a vote changes a post's score
pub const ACTIVITY_POST_VOTED: &str = "community_post_voted";
/// Activity tag recorded when a comment is created
pub const ACTIVITY_COMMENT_CREATED: &str = "community_comment_created";

/// User row (owned by the auth component, read-only here)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// Post row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub score: i32,
    pub created_at: DateTime<Utc>,
}

/// Vote row; at most one per (post, user)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PostVote {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub vote_value: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub parent_comment_id: Option<Uuid>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Activity event row; append-only
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActivityEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub activity_type: String,
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Post as returned to clients, with author name, derived comment count and
/// the caller's own vote (0 when none)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PostView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub title: String,
    pub content: String,
    pub score: i32,
    pub comment_count: i64,
    pub user_vote: i16,
    pub created_at: DateTime<Utc>,
}

/// Comment as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CommentView {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub parent_comment_id: Option<Uuid>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Feed ordering
///
/// Every mode ends with `created_at DESC, id DESC` so equal keys paginate
/// deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedSort {
    /// `score * 4 - age_hours / 6`, favouring well-voted recent posts
    #[default]
    Hot,
    /// Newest first
    New,
    /// Highest score first
    Top,
}

impl FeedSort {
    /// SQL `ORDER BY` expression over the `community_posts` alias `p`
    pub fn order_by(self) -> &'static str {
        match self {
            FeedSort::New => "p.created_at DESC, p.id DESC",
            FeedSort::Top => "p.score DESC, p.created_at DESC, p.id DESC",
            FeedSort::Hot => {
                "(p.score * 4.0 - GREATEST(EXTRACT(EPOCH FROM (NOW() - p.created_at)) / 3600.0, 0) / 6.0) DESC, \
                 p.created_at DESC, p.id DESC"
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FeedSort::Hot => "hot",
            FeedSort::New => "new",
            FeedSort::Top => "top",
        }
    }
}

impl FromStr for FeedSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hot" => Ok(FeedSort::Hot),
            "new" => Ok(FeedSort::New),
            "top" => Ok(FeedSort::Top),
            other => Err(format!(
                "Invalid sort '{}': expected one of hot, new, top",
                other
            )),
        }
    }
}

/// Paginated list envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub total: i64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(total: i64, items: Vec<T>) -> Self {
        Self { total, items }
    }
}

/// Cut `text` to at most `max_chars` characters without splitting a code point
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("héllo wörld", 7), "héllo w");
        assert_eq!(truncate_chars("", 5), "");
    }

    #[test]
    fn test_feed_sort_parsing() {
        assert_eq!("hot".parse::<FeedSort>().unwrap(), FeedSort::Hot);
        assert_eq!("NEW".parse::<FeedSort>().unwrap(), FeedSort::New);
        assert_eq!(" top ".parse::<FeedSort>().unwrap(), FeedSort::Top);
        assert!("best".parse::<FeedSort>().is_err());
        assert_eq!(FeedSort::default(), FeedSort::Hot);
    }

    #[test]
    fn test_every_order_ends_with_id_tiebreak() {
        for sort in [FeedSort::Hot, FeedSort::New, FeedSort::Top] {
            assert!(sort.order_by().ends_with("p.created_at DESC, p.id DESC"));
        }
    }

    #[test]
    fn test_page_serializes_total_and_items() {
        let page = Page::new(2, vec![1, 2]);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json, serde_json::json!({"total": 2, "items": [1, 2]}));
    }
}
