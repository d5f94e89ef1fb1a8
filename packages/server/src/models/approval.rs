use chrono::{DateTime, Utc};
use podium_common::ApprovalStatus;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Serialize, utoipa::ToSchema)]
pub struct ApprovalResponse {
    pub contest_id: i32,
    pub user_id: i32,
    pub status: ApprovalStatus,
    pub requested_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl From<crate::entity::approval::Model> for ApprovalResponse {
    fn from(m: crate::entity::approval::Model) -> Self {
        Self {
            contest_id: m.contest_id,
            user_id: m.user_id,
            status: m.status,
            requested_at: m.requested_at,
            reviewed_at: m.reviewed_at,
        }
    }
}

/// Approval row as seen by a reviewer.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ApprovalListItem {
    pub user_id: i32,
    #[schema(example = "Asha Verma")]
    pub user_name: String,
    pub status: ApprovalStatus,
    pub requested_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApprovalListQuery {
    /// Only return approvals in this status.
    pub status: Option<ApprovalStatus>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct ReviewApprovalRequest {
    /// `approved` or `rejected`.
    pub status: ApprovalStatus,
}

pub fn validate_review_approval(req: &ReviewApprovalRequest) -> Result<(), AppError> {
    if !req.status.is_decision() {
        return Err(AppError::Validation(
            "status must be one of: approved, rejected".into(),
        ));
    }
    Ok(())
}
