use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One voter's ballot in one contest. Keyed by `(contest_id, voter_id)`, so a
/// voter can never hold two votes in the same contest.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vote")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub contest_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub voter_id: i32,
    #[sea_orm(belongs_to, from = "contest_id", to = "id")]
    pub contest: HasOne<super::contest::Entity>,

    /// User id of the approved participant this vote counts toward.
    pub participant_id: i32,
    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
