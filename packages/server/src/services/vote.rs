use chrono::Utc;
use podium_common::ApprovalStatus;
use sea_orm::*;
use tracing::instrument;

use super::contest::ContestService;
use super::is_unique_violation;
use crate::entity::{approval, user, vote};
use crate::error::AppError;

/// Ballots: one per voter per contest.
pub struct VoteService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> VoteService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Record a vote for an approved participant.
    ///
    /// Voting closes at the contest's end date. A second vote by the same
    /// voter is rejected by the store's key and reported as `AlreadyVoted`.
    #[instrument(skip(self))]
    pub async fn cast_vote(
        &self,
        voter_id: i32,
        contest_id: i32,
        participant_id: i32,
    ) -> Result<vote::Model, AppError> {
        let contests = ContestService::new(self.conn);
        let voter = contests.find_user(voter_id).await?;
        let contest = contests
            .find_institute_contest(contest_id, voter.institute_id)
            .await?;

        let now = Utc::now();
        if now >= contest.end_date {
            return Err(AppError::Validation("Voting has closed for this contest".into()));
        }

        let participant = approval::Entity::find_by_id((contest_id, participant_id))
            .filter(approval::Column::Status.eq(ApprovalStatus::Approved))
            .find_also_related(user::Entity)
            .one(self.conn)
            .await?
            .and_then(|(_, usr)| usr)
            .filter(|usr| contest.category.admits(usr.gender));
        if participant.is_none() {
            return Err(AppError::NotFound("Participant not found".into()));
        }

        let ballot = vote::ActiveModel {
            contest_id: Set(contest_id),
            voter_id: Set(voter_id),
            participant_id: Set(participant_id),
            created_at: Set(now),
            ..Default::default()
        };

        match ballot.insert(self.conn).await {
            Ok(model) => {
                tracing::info!(voter_id, contest_id, participant_id, "Vote recorded");
                Ok(model)
            }
            Err(e) if is_unique_violation(&e) => Err(AppError::AlreadyVoted),
            Err(e) => Err(e.into()),
        }
    }

    /// The voter's ballot in a contest, if any.
    pub async fn my_vote(
        &self,
        voter_id: i32,
        contest_id: i32,
    ) -> Result<Option<vote::Model>, AppError> {
        let contests = ContestService::new(self.conn);
        let voter = contests.find_user(voter_id).await?;
        contests
            .find_institute_contest(contest_id, voter.institute_id)
            .await?;

        let ballot = vote::Entity::find_by_id((contest_id, voter_id))
            .one(self.conn)
            .await?;
        Ok(ballot)
    }
}
