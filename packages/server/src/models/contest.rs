use chrono::{DateTime, Utc};
use podium_common::Category;
use serde::Serialize;

use super::leaderboard::LeaderboardEntry;

#[derive(Serialize, utoipa::ToSchema)]
pub struct ContestResponse {
    #[schema(example = 12)]
    pub id: i32,
    #[schema(example = "Mr. Fresher 2025")]
    pub name: String,
    pub category: Category,
    pub end_date: DateTime<Utc>,
    pub institute_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::contest::Model> for ContestResponse {
    fn from(m: crate::entity::contest::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            category: m.category,
            end_date: m.end_date,
            institute_id: m.institute_id,
            created_at: m.created_at,
        }
    }
}

/// Ranked participants of a contest.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LeaderboardResponse {
    pub contest: ContestResponse,
    /// Highest vote count first; ties keep approval order.
    pub entries: Vec<LeaderboardEntry>,
}

/// Podium of a finished contest.
#[derive(Serialize, utoipa::ToSchema)]
pub struct WinnersResponse {
    pub contest: ContestResponse,
    /// At most three entries.
    pub winners: Vec<LeaderboardEntry>,
}
