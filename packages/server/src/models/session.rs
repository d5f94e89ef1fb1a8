use podium_common::ContestSelection;
use serde::{Deserialize, Serialize};

use super::contest::{ContestResponse, LeaderboardResponse};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct SelectContestRequest {
    #[schema(example = 12)]
    pub contest_id: i32,
}

/// What the client should show for the current selection.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewResponse {
    List {
        selection: ContestSelection,
        contests: Vec<ContestResponse>,
    },
    Leaderboard {
        selection: ContestSelection,
        leaderboard: LeaderboardResponse,
    },
}
