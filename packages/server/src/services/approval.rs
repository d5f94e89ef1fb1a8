use chrono::Utc;
use podium_common::ApprovalStatus;
use sea_orm::prelude::Expr;
use sea_orm::*;
use tracing::instrument;

use super::contest::ContestService;
use super::is_unique_violation;
use crate::entity::{approval, contest, user};
use crate::error::AppError;

/// Participation requests and their review.
pub struct ApprovalService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

/// Check that a user may take part in a contest.
///
/// A profile image is required, and the contest category must admit the
/// user's gender.
pub fn check_eligibility(user: &user::Model, contest: &contest::Model) -> Result<(), AppError> {
    if user.image.as_deref().is_none_or(|url| url.trim().is_empty()) {
        return Err(AppError::Ineligible(
            "A profile image is required to participate".into(),
        ));
    }
    if !contest.category.admits(user.gender) {
        return Err(AppError::Ineligible(format!(
            "Contest '{}' is restricted to the {} category",
            contest.name, contest.category
        )));
    }
    Ok(())
}

impl<'a, C: ConnectionTrait> ApprovalService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Create a pending approval for `(user, contest)`.
    ///
    /// A second request for the same pair is rejected by the store's key and
    /// reported as `AlreadyRequested`; no pre-check is made. Eligibility is
    /// checked first, so a repeat request from a user who is no longer
    /// eligible reports `Ineligible`.
    #[instrument(skip(self))]
    pub async fn request_participation(
        &self,
        user_id: i32,
        contest_id: i32,
    ) -> Result<approval::Model, AppError> {
        let contests = ContestService::new(self.conn);
        let user = contests.find_user(user_id).await?;
        let contest = contests
            .find_institute_contest(contest_id, user.institute_id)
            .await?;

        if let Err(e) = check_eligibility(&user, &contest) {
            tracing::info!(user_id, contest_id, "Ineligible participation request");
            return Err(e);
        }

        let new_approval = approval::ActiveModel {
            contest_id: Set(contest_id),
            user_id: Set(user_id),
            status: Set(ApprovalStatus::Pending),
            requested_at: Set(Utc::now()),
            reviewed_at: Set(None),
            ..Default::default()
        };

        match new_approval.insert(self.conn).await {
            Ok(model) => {
                tracing::info!(user_id, contest_id, "Participation requested");
                Ok(model)
            }
            Err(e) if is_unique_violation(&e) => Err(AppError::AlreadyRequested),
            Err(e) => Err(e.into()),
        }
    }

    /// Approvals of a contest with their users, in request order.
    pub async fn list_approvals(
        &self,
        contest_id: i32,
        status: Option<ApprovalStatus>,
    ) -> Result<Vec<(approval::Model, Option<user::Model>)>, AppError> {
        ContestService::new(self.conn)
            .find_contest(contest_id)
            .await?;

        let mut select = approval::Entity::find().filter(approval::Column::ContestId.eq(contest_id));
        if let Some(status) = status {
            select = select.filter(approval::Column::Status.eq(status));
        }

        let rows = select
            .find_also_related(user::Entity)
            .order_by_asc(approval::Column::RequestedAt)
            .order_by_asc(approval::Column::UserId)
            .all(self.conn)
            .await?;
        Ok(rows)
    }

    /// Approve or reject a pending request.
    ///
    /// The status change is a single conditional update, so two reviewers
    /// cannot both decide the same request.
    #[instrument(skip(self))]
    pub async fn review(
        &self,
        contest_id: i32,
        user_id: i32,
        decision: ApprovalStatus,
    ) -> Result<approval::Model, AppError> {
        if !decision.is_decision() {
            return Err(AppError::Validation(
                "status must be one of: approved, rejected".into(),
            ));
        }

        let result = approval::Entity::update_many()
            .col_expr(approval::Column::Status, Expr::value(decision))
            .col_expr(approval::Column::ReviewedAt, Expr::value(Some(Utc::now())))
            .filter(approval::Column::ContestId.eq(contest_id))
            .filter(approval::Column::UserId.eq(user_id))
            .filter(approval::Column::Status.eq(ApprovalStatus::Pending))
            .exec(self.conn)
            .await?;

        let current = approval::Entity::find_by_id((contest_id, user_id))
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::NotFound("Approval not found".into()))?;

        if result.rows_affected == 0 {
            return Err(AppError::Conflict(format!(
                "Approval has already been {}",
                current.status
            )));
        }

        tracing::info!(contest_id, user_id, status = %decision, "Approval reviewed");
        Ok(current)
    }
}
