/// Vote service - the per-user vote ledger and the denormalized post score
///
/// Each request runs in one transaction:
/// 1. lock the caller's existing vote row (`FOR UPDATE`)
/// 2. plan a [`VoteTransition`] from the previous and desired values
/// 3. insert/update/delete the vote row
/// 4. add the transition's delta to `community_posts.score` in place
/// 5. record `community_post_voted` when the score moved
///
/// A first vote uses `ON CONFLICT DO NOTHING`; when a concurrent request from
/// the same user wins the insert, the loop re-reads the committed row and
/// takes the update path instead.
use crate::db::{activity_repo, post_repo, vote_repo};
use crate::error::{AppError, Result};
use crate::metrics::community::{VOTE_INSERT_CONFLICTS_TOTAL, VOTE_OUTCOMES_TOTAL};
use crate::models::{PostView, User, ACTIVITY_POST_VOTED};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

/// Attempts before giving up on a vote that keeps racing with the same user
const MAX_VOTE_ATTEMPTS: usize = 3;

/// A vote value accepted from clients: -1 (down), 0 (clear) or 1 (up)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteValue(i16);

impl VoteValue {
    pub const DOWN: VoteValue = VoteValue(-1);
    pub const CLEAR: VoteValue = VoteValue(0);
    pub const UP: VoteValue = VoteValue(1);

    pub fn get(self) -> i16 {
        self.0
    }
}

impl TryFrom<i16> for VoteValue {
    type Error = AppError;

    fn try_from(value: i16) -> Result<Self> {
        match value {
            -1..=1 => Ok(VoteValue(value)),
            _ => Err(AppError::Validation(
                "Vote value must be -1, 0 or 1".to_string(),
            )),
        }
    }
}

/// What a vote request does to the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTransition {
    /// Same value as before (or clearing a vote that does not exist)
    Unchanged,
    /// First vote by this user on this post
    Insert { value: i16 },
    /// Flip an existing vote
    Update { from: i16, to: i16 },
    /// Clear an existing vote
    Remove { previous: i16 },
}

impl VoteTransition {
    pub fn plan(previous: Option<i16>, desired: VoteValue) -> Self {
        match (previous, desired.get()) {
            (None, 0) => VoteTransition::Unchanged,
            (None, value) => VoteTransition::Insert { value },
            (Some(previous), 0) => VoteTransition::Remove { previous },
            (Some(from), to) if from == to => VoteTransition::Unchanged,
            (Some(from), to) => VoteTransition::Update { from, to },
        }
    }

    /// Change to apply to the post score
    pub fn delta(self) -> i32 {
        match self {
            VoteTransition::Unchanged => 0,
            VoteTransition::Insert { value } => i32::from(value),
            VoteTransition::Update { from, to } => i32::from(to) - i32::from(from),
            VoteTransition::Remove { previous } => -i32::from(previous),
        }
    }

    /// Metrics label
    pub fn outcome(self) -> &'static str {
        match self {
            VoteTransition::Unchanged => "unchanged",
            VoteTransition::Insert { .. } => "created",
            VoteTransition::Update { .. } => "changed",
            VoteTransition::Remove { .. } => "removed",
        }
    }
}

pub struct VoteService {
    pool: PgPool,
}

impl VoteService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Set the caller's vote on a post and return the post as the caller now sees it
    pub async fn cast_vote(&self, voter: &User, post_id: Uuid, value: VoteValue) -> Result<PostView> {
        let mut tx = self.pool.begin().await?;

        if !post_repo::post_exists(&mut *tx, post_id).await? {
            return Err(AppError::NotFound("Post not found".to_string()));
        }

        let mut applied = None;
        for attempt in 1..=MAX_VOTE_ATTEMPTS {
            let existing = vote_repo::find_vote_for_update(&mut *tx, post_id, voter.id).await?;
            let transition = VoteTransition::plan(existing.as_ref().map(|v| v.vote_value), value);

            match (transition, existing) {
                (VoteTransition::Insert { value }, _) => {
                    let inserted =
                        vote_repo::insert_vote_if_absent(&mut *tx, post_id, voter.id, value)
                            .await?;
                    if inserted.is_none() {
                        VOTE_INSERT_CONFLICTS_TOTAL.inc();
                        tracing::debug!(
                            %post_id,
                            user_id = %voter.id,
                            attempt,
                            "Concurrent first vote detected; re-reading"
                        );
                        continue;
                    }
                }
                (VoteTransition::Update { to, .. }, Some(vote)) => {
                    vote_repo::update_vote_value(&mut *tx, vote.id, to).await?;
                }
                (VoteTransition::Remove { .. }, Some(vote)) => {
                    vote_repo::delete_vote(&mut *tx, vote.id).await?;
                }
                _ => {}
            }

            applied = Some(transition);
            break;
        }

        let transition = applied.ok_or_else(|| {
            AppError::Internal(format!(
                "vote on post {} not applied after {} attempts",
                post_id, MAX_VOTE_ATTEMPTS
            ))
        })?;

        let delta = transition.delta();
        if delta != 0 {
            let score_after = post_repo::add_to_score(&mut *tx, post_id, delta)
                .await?
                .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

            activity_repo::record_activity(
                &mut *tx,
                voter.id,
                ACTIVITY_POST_VOTED,
                Some(json!({
                    "post_id": post_id,
                    "vote_value": value.get(),
                    "score_after": score_after,
                })),
            )
            .await?;

            tracing::info!(%post_id, user_id = %voter.id, delta, score_after, "Vote applied");
        }

        let view = post_repo::find_post_view(&mut *tx, post_id, voter.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        tx.commit().await?;

        VOTE_OUTCOMES_TOTAL
            .with_label_values(&[transition.outcome()])
            .inc();

        Ok(view)
    }
}
