pub mod approval;
pub mod contest;
pub mod profile;
pub mod session;
pub mod view;
pub mod vote;
