/// Business logic layer for community-service
///
/// - Post service: post creation, feed listing and single-post views
/// - Vote service: the vote ledger and the denormalized post score
/// - Comment service: one-level comment threads
/// - Activity service: the per-user activity timeline
/// - User service: resolving the authenticated caller
///
/// Request types are converted into validated inputs (`NewPost`, `FeedPage`,
/// `VoteValue`, `NewComment`, `Pagination`) before any query runs.
pub mod activity;
pub mod comments;
pub mod pagination;
pub mod posts;
pub mod users;
pub mod votes;

pub use activity::ActivityService;
pub use comments::{CommentService, NewComment};
pub use pagination::Pagination;
pub use posts::{build_title, FeedPage, NewPost, PostService, UNTITLED_POST};
pub use users::UserService;
pub use votes::{VoteService, VoteTransition, VoteValue};
