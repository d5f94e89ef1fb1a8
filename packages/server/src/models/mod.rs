pub mod approval;
pub mod contest;
pub mod leaderboard;
pub mod profile;
pub mod session;
pub mod shared;
pub mod vote;
