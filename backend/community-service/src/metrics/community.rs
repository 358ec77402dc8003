use lazy_static::lazy_static;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

lazy_static! {
    /// Posts created.
    pub static ref POSTS_CREATED_TOTAL: IntCounter = register_int_counter!(
        "community_posts_created_total",
        "Total community posts created"
    )
    .expect("failed to register community_posts_created_total");

    /// Comments created, split into top-level comments and replies.
    pub static ref COMMENTS_CREATED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "community_comments_created_total",
        "Total community comments created segmented by kind",
        &["kind"]
    )
    .expect("failed to register community_comments_created_total");

    /// Vote requests by outcome (created/changed/removed/unchanged).
    pub static ref VOTE_OUTCOMES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "community_vote_outcomes_total",
        "Vote requests segmented by outcome",
        &["outcome"]
    )
    .expect("failed to register community_vote_outcomes_total");

    /// Vote inserts that lost a race with a concurrent request from the same user.
    pub static ref VOTE_INSERT_CONFLICTS_TOTAL: IntCounter = register_int_counter!(
        "community_vote_insert_conflicts_total",
        "First-vote inserts absorbed by the unique constraint"
    )
    .expect("failed to register community_vote_insert_conflicts_total");
}
