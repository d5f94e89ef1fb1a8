use std::collections::HashMap;

use podium_common::{ApprovalStatus, Ranked, rank};
use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{approval, branch, contest, user, vote};
use crate::error::AppError;
use crate::models::leaderboard::ParticipantProfile;

/// Read-only queries over contests and their participants.
pub struct ContestService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> ContestService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Look up a contest by ID, returning 404 if not found.
    pub async fn find_contest(&self, contest_id: i32) -> Result<contest::Model, AppError> {
        contest::Entity::find_by_id(contest_id)
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::NotFound("Contest not found".into()))
    }

    /// Look up a contest the caller's institute owns. Contests of other
    /// institutes are reported as missing.
    pub async fn find_institute_contest(
        &self,
        contest_id: i32,
        institute_id: Option<i32>,
    ) -> Result<contest::Model, AppError> {
        let contest = self.find_contest(contest_id).await?;
        if institute_id != Some(contest.institute_id) {
            return Err(AppError::NotFound("Contest not found".into()));
        }
        Ok(contest)
    }

    /// Resolve the caller and a contest of their institute.
    pub async fn find_contest_for_user(
        &self,
        user_id: i32,
        contest_id: i32,
    ) -> Result<(user::Model, contest::Model), AppError> {
        let user = self.find_user(user_id).await?;
        let contest = self
            .find_institute_contest(contest_id, user.institute_id)
            .await?;
        Ok((user, contest))
    }

    pub async fn find_user(&self, user_id: i32) -> Result<user::Model, AppError> {
        user::Entity::find_by_id(user_id)
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    /// All contests of an institute, soonest ending first.
    #[instrument(skip(self))]
    pub async fn list_all_contests(
        &self,
        institute_id: Option<i32>,
    ) -> Result<Vec<contest::Model>, AppError> {
        let Some(institute_id) = institute_id else {
            return Ok(Vec::new());
        };

        let contests = contest::Entity::find()
            .filter(contest::Column::InstituteId.eq(institute_id))
            .order_by_asc(contest::Column::EndDate)
            .order_by_asc(contest::Column::Id)
            .all(self.conn)
            .await?;
        Ok(contests)
    }

    /// Contests of an institute the user could still ask to join: the
    /// category admits the user's gender and the user has no approval record
    /// for it, whatever its status.
    #[instrument(skip(self))]
    pub async fn list_joinable_contests(
        &self,
        institute_id: Option<i32>,
        user_id: i32,
    ) -> Result<Vec<contest::Model>, AppError> {
        let Some(institute_id) = institute_id else {
            return Ok(Vec::new());
        };
        let user = self.find_user(user_id).await?;

        let requested = SeaQuery::select()
            .column(approval::Column::ContestId)
            .from(approval::Entity)
            .and_where(approval::Column::UserId.eq(user_id))
            .to_owned();

        let contests = contest::Entity::find()
            .filter(contest::Column::InstituteId.eq(institute_id))
            .filter(contest::Column::Id.not_in_subquery(requested))
            .order_by_asc(contest::Column::EndDate)
            .order_by_asc(contest::Column::Id)
            .all(self.conn)
            .await?;

        Ok(contests
            .into_iter()
            .filter(|c| c.category.admits(user.gender))
            .collect())
    }

    /// Approved participants of a contest with their vote counts, in the
    /// order their requests were made.
    ///
    /// Users whose gender the contest category does not admit are left out
    /// even if an approval exists for them.
    #[instrument(skip(self))]
    pub async fn list_participants(
        &self,
        contest_id: i32,
    ) -> Result<Vec<(ParticipantProfile, u64)>, AppError> {
        let contest = self.find_contest(contest_id).await?;

        let rows = approval::Entity::find()
            .filter(approval::Column::ContestId.eq(contest_id))
            .filter(approval::Column::Status.eq(ApprovalStatus::Approved))
            .find_also_related(user::Entity)
            .order_by_asc(approval::Column::RequestedAt)
            .order_by_asc(approval::Column::UserId)
            .all(self.conn)
            .await?;

        let users: Vec<user::Model> = rows
            .into_iter()
            .filter_map(|(_, usr)| usr)
            .filter(|usr| contest.category.admits(usr.gender))
            .collect();
        if users.is_empty() {
            return Ok(Vec::new());
        }

        let branch_ids: Vec<i32> = users.iter().filter_map(|u| u.branch_id).collect();
        let branches: HashMap<i32, String> = if branch_ids.is_empty() {
            HashMap::new()
        } else {
            branch::Entity::find()
                .filter(branch::Column::Id.is_in(branch_ids))
                .all(self.conn)
                .await?
                .into_iter()
                .map(|b| (b.id, b.name))
                .collect()
        };

        let counts: HashMap<i32, i64> = vote::Entity::find()
            .select_only()
            .column(vote::Column::ParticipantId)
            .column_as(vote::Column::VoterId.count(), "votes")
            .filter(vote::Column::ContestId.eq(contest_id))
            .group_by(vote::Column::ParticipantId)
            .into_tuple::<(i32, i64)>()
            .all(self.conn)
            .await?
            .into_iter()
            .collect();

        Ok(users
            .into_iter()
            .map(|usr| {
                let votes = counts
                    .get(&usr.id)
                    .copied()
                    .and_then(|n| u64::try_from(n).ok())
                    .unwrap_or(0);
                let profile = ParticipantProfile {
                    user_id: usr.id,
                    name: usr.name,
                    image: usr.image,
                    branch: usr.branch_id.and_then(|id| branches.get(&id).cloned()),
                };
                (profile, votes)
            })
            .collect())
    }

    /// Participants ranked by votes, highest first.
    pub async fn leaderboard(
        &self,
        contest_id: i32,
    ) -> Result<Vec<Ranked<ParticipantProfile>>, AppError> {
        Ok(rank(self.list_participants(contest_id).await?))
    }
}
