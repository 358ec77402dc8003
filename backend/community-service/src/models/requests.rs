/// Request bodies and query strings
///
/// Text fields are trimmed by `normalized()` before `validate()` runs, so the
/// length limits apply to what is actually stored.
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

pub const POST_TITLE_MAX_CHARS: usize = 220;
pub const POST_CONTENT_MAX_CHARS: usize = 2400;
pub const COMMENT_CONTENT_MAX_CHARS: usize = 1200;

pub const FEED_DEFAULT_LIMIT: i64 = 30;
pub const COMMENTS_DEFAULT_LIMIT: i64 = 100;
pub const ACTIVITY_DEFAULT_LIMIT: i64 = 40;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[serde(default)]
    #[validate(length(max = 220, message = "Title must be at most 220 characters"))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = 2400,
        message = "Post content must be between 1 and 2400 characters"
    ))]
    pub content: String,
}

impl CreatePostRequest {
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            content: self.content.trim().to_string(),
        }
    }
}

/// Body of `POST /community/posts/{id}/vote`; the value is checked when it is
/// converted into a `VoteValue`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRequest {
    pub value: i16,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(
        min = 1,
        max = 1200,
        message = "Comment must be between 1 and 1200 characters"
    ))]
    pub content: String,

    #[serde(default)]
    pub parent_comment_id: Option<Uuid>,
}

impl CreateCommentRequest {
    pub fn normalized(self) -> Self {
        Self {
            content: self.content.trim().to_string(),
            parent_comment_id: self.parent_comment_id,
        }
    }
}

/// `GET /community/posts`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct FeedQuery {
    pub sort: Option<String>,

    #[validate(range(min = 1, max = 200, message = "limit must be between 1 and 200"))]
    pub limit: Option<i64>,

    #[validate(range(min = 0, message = "offset must be non-negative"))]
    pub offset: Option<i64>,
}

impl FeedQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(FEED_DEFAULT_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }
}

/// `GET /community/posts/{id}/comments`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CommentListQuery {
    #[validate(range(min = 1, max = 300, message = "limit must be between 1 and 300"))]
    pub limit: Option<i64>,

    #[validate(range(min = 0, message = "offset must be non-negative"))]
    pub offset: Option<i64>,
}

impl CommentListQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(COMMENTS_DEFAULT_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }
}

/// `GET /community/activity`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ActivityQuery {
    #[validate(range(min = 1, max = 200, message = "limit must be between 1 and 200"))]
    pub limit: Option<i64>,

    #[validate(range(min = 0, message = "offset must be non-negative"))]
    pub offset: Option<i64>,

    /// Another user's timeline; honored for admins only
    pub user_id: Option<Uuid>,
}

impl ActivityQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(ACTIVITY_DEFAULT_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_request_trims_before_validation() {
        let req = CreatePostRequest {
            title: "   ".into(),
            content: "   ".into(),
        }
        .normalized();
        assert!(req.title.is_empty());
        assert!(req.validate().is_err());

        let req = CreatePostRequest {
            title: String::new(),
            content: "  hello  ".into(),
        }
        .normalized();
        assert_eq!(req.content, "hello");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_post_content_limit_counts_characters() {
        let at_limit = CreatePostRequest {
            title: String::new(),
            content: "é".repeat(POST_CONTENT_MAX_CHARS),
        };
        assert!(at_limit.validate().is_ok());

        let over = CreatePostRequest {
            title: String::new(),
            content: "a".repeat(POST_CONTENT_MAX_CHARS + 1),
        };
        assert!(over.validate().is_err());

        let long_title = CreatePostRequest {
            title: "t".repeat(POST_TITLE_MAX_CHARS + 1),
            content: "body".into(),
        };
        assert!(long_title.validate().is_err());
    }

    #[test]
    fn test_post_title_defaults_to_empty() {
        let req: CreatePostRequest = serde_json::from_str(r#"{"content": "hi"}"#).unwrap();
        assert_eq!(req.title, "");
    }

    #[test]
    fn test_vote_request_rejects_fractional_values() {
        assert!(serde_json::from_str::<VoteRequest>(r#"{"value": 1}"#).is_ok());
        assert!(serde_json::from_str::<VoteRequest>(r#"{"value": 0.5}"#).is_err());
        assert!(serde_json::from_str::<VoteRequest>(r#"{}"#).is_err());
    }

    #[test]
    fn test_comment_limits() {
        let req = CreateCommentRequest {
            content: format!("  {}  ", "c".repeat(COMMENT_CONTENT_MAX_CHARS)),
            parent_comment_id: None,
        }
        .normalized();
        assert!(req.validate().is_ok());

        let req = CreateCommentRequest {
            content: "c".repeat(COMMENT_CONTENT_MAX_CHARS + 1),
            parent_comment_id: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_query_bounds_and_defaults() {
        let q = FeedQuery::default();
        assert!(q.validate().is_ok());
        assert_eq!(q.limit(), FEED_DEFAULT_LIMIT);
        assert_eq!(q.offset(), 0);

        assert!(FeedQuery {
            limit: Some(0),
            ..Default::default()
        }
        .validate()
        .is_err());
        assert!(FeedQuery {
            limit: Some(201),
            ..Default::default()
        }
        .validate()
        .is_err());
        assert!(FeedQuery {
            offset: Some(-1),
            ..Default::default()
        }
        .validate()
        .is_err());

        assert!(CommentListQuery {
            limit: Some(300),
            offset: None
        }
        .validate()
        .is_ok());
        assert!(CommentListQuery {
            limit: Some(301),
            offset: None
        }
        .validate()
        .is_err());
        assert_eq!(CommentListQuery::default().limit(), COMMENTS_DEFAULT_LIMIT);

        assert!(ActivityQuery {
            limit: Some(201),
            ..Default::default()
        }
        .validate()
        .is_err());
        assert_eq!(ActivityQuery::default().limit(), ACTIVITY_DEFAULT_LIMIT);
    }
}
