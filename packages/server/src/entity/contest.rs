use podium_common::Category;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contest")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub category: Category,
    /// Voting closes at this instant; winners are published after it.
    pub end_date: DateTimeUtc,

    pub institute_id: i32,
    #[sea_orm(belongs_to, from = "institute_id", to = "id")]
    pub institute: HasOne<super::institute::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
