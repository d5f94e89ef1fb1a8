use podium_common::{Ranked, Tier};
use serde::Serialize;

/// Public profile of an approved participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct ParticipantProfile {
    #[schema(example = 42)]
    pub user_id: i32,
    #[schema(example = "Asha Verma")]
    pub name: String,
    pub image: Option<String>,
    /// Branch name, if the user has one.
    #[schema(example = "Computer Science")]
    pub branch: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct LeaderboardEntry {
    /// 0-indexed position.
    #[schema(example = 0)]
    pub position: usize,
    pub tier: Tier,
    #[schema(example = 17)]
    pub votes: u64,
    pub participant: ParticipantProfile,
}

impl From<Ranked<ParticipantProfile>> for LeaderboardEntry {
    fn from(ranked: Ranked<ParticipantProfile>) -> Self {
        Self {
            position: ranked.position,
            tier: ranked.tier(),
            votes: ranked.votes,
            participant: ranked.entry,
        }
    }
}
