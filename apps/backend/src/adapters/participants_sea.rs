//! SeaORM adapter for participant persistence - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::participants;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_id: i64,
) -> Result<Option<participants::Model>, sea_orm::DbErr> {
    participants::Entity::find_by_id(participant_id).one(conn).await
}

pub async fn find_by_group_and_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
    user_id: i64,
) -> Result<Option<participants::Model>, sea_orm::DbErr> {
    participants::Entity::find()
        .filter(participants::Column::GroupId.eq(group_id))
        .filter(participants::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

pub async fn list_for_group<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
) -> Result<Vec<participants::Model>, sea_orm::DbErr> {
    participants::Entity::find()
        .filter(participants::Column::GroupId.eq(group_id))
        .order_by_asc(participants::Column::Id)
        .all(conn)
        .await
}

pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<participants::Model>, sea_orm::DbErr> {
    participants::Entity::find()
        .filter(participants::Column::UserId.eq(user_id))
        .order_by_desc(participants::Column::CreatedAt)
        .all(conn)
        .await
}

pub async fn create_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
    user_id: i64,
    anonymous_name: &str,
) -> Result<participants::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let participant_active = participants::ActiveModel {
        id: NotSet,
        group_id: Set(group_id),
        user_id: Set(user_id),
        anonymous_name: Set(anonymous_name.to_string()),
        created_at: Set(now),
    };

    participant_active.insert(conn).await
}
