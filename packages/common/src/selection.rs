use serde::{Deserialize, Serialize};

/// Which screen a session is looking at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    List,
    Leaderboard,
}

/// Contest selection of one client session.
///
/// Going back to the list keeps `selected_contest_id`; callers that render a
/// leaderboard must go through [`ContestSelection::leaderboard_target`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ContestSelection {
    pub selected_contest_id: Option<i32>,
    pub view: View,
}

impl ContestSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a contest and switch to its leaderboard.
    pub fn select(&mut self, contest_id: i32) {
        self.selected_contest_id = Some(contest_id);
        self.view = View::Leaderboard;
    }

    /// Return to the contest list.
    pub fn go_back(&mut self) {
        self.view = View::List;
    }

    /// The contest whose leaderboard should be shown, if any.
    pub fn leaderboard_target(&self) -> Option<i32> {
        match self.view {
            View::Leaderboard => self.selected_contest_id,
            View::List => None,
        }
    }
}
