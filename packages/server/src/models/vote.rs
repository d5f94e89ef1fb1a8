use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CastVoteRequest {
    /// User id of the participant to vote for.
    #[schema(example = 42)]
    pub participant_id: i32,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct VoteResponse {
    pub contest_id: i32,
    pub voter_id: i32,
    pub participant_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::vote::Model> for VoteResponse {
    fn from(m: crate::entity::vote::Model) -> Self {
        Self {
            contest_id: m.contest_id,
            voter_id: m.voter_id,
            participant_id: m.participant_id,
            created_at: m.created_at,
        }
    }
}

/// The caller's vote in a contest, `null` if they have not voted.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MyVoteResponse {
    pub vote: Option<VoteResponse>,
}
