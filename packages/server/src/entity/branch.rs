use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Department or programme a user belongs to, shown next to names on the leaderboard.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "branch")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    pub institute_id: i32,
    #[sea_orm(belongs_to, from = "institute_id", to = "id")]
    pub institute: HasOne<super::institute::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
