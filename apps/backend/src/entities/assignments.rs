use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A directed giver → receiver edge, created only by the draw orchestrator
/// and never updated afterwards.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "group_id")]
    pub group_id: i64,
    #[sea_orm(column_name = "giver_id")]
    pub giver_id: i64,
    #[sea_orm(column_name = "receiver_id")]
    pub receiver_id: i64,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::groups::Entity",
        from = "Column::GroupId",
        to = "super::groups::Column::Id"
    )]
    Group,
    #[sea_orm(
        belongs_to = "super::participants::Entity",
        from = "Column::GiverId",
        to = "super::participants::Column::Id"
    )]
    Giver,
    #[sea_orm(
        belongs_to = "super::participants::Entity",
        from = "Column::ReceiverId",
        to = "super::participants::Column::Id"
    )]
    Receiver,
}

impl Related<super::groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
