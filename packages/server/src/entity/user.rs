use podium_common::Gender;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Users are created by the identity provider at registration; only `image`
/// is written by this service.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    /// Profile image URL. Required before requesting participation.
    pub image: Option<String>,
    pub gender: Gender,

    pub institute_id: Option<i32>,
    #[sea_orm(belongs_to, from = "institute_id", to = "id")]
    pub institute: HasOne<super::institute::Entity>,

    pub branch_id: Option<i32>,
    #[sea_orm(belongs_to, from = "branch_id", to = "id")]
    pub branch: HasOne<super::branch::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
