pub mod approval_status;
pub mod eligibility;
pub mod error;
pub mod ranking;
pub mod selection;

pub use approval_status::ApprovalStatus;
pub use eligibility::{Category, Gender};
pub use error::ParseEnumError;
pub use ranking::{Ranked, Tier, podium, rank};
pub use selection::{ContestSelection, View};
