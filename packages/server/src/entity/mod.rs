pub mod approval;
pub mod branch;
pub mod contest;
pub mod institute;
pub mod user;
pub mod vote;
