use crate::error::Result;
use crate::models::{ActivityQuery, CommentListQuery};
use validator::Validate;

/// Validated `LIMIT`/`OFFSET` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    pub fn for_comments(query: &CommentListQuery) -> Result<Self> {
        query.validate()?;
        Ok(Self {
            limit: query.limit(),
            offset: query.offset(),
        })
    }

    pub fn for_activity(query: &ActivityQuery) -> Result<Self> {
        query.validate()?;
        Ok(Self {
            limit: query.limit(),
            offset: query.offset(),
        })
    }
}
