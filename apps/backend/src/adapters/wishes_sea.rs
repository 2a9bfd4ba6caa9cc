//! SeaORM adapter for wish persistence - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::wishes;

#[derive(Debug, Clone)]
pub struct WishCreate {
    pub participant_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub priority: i32,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    wish_id: i64,
) -> Result<Option<wishes::Model>, sea_orm::DbErr> {
    wishes::Entity::find_by_id(wish_id).one(conn).await
}

/// Wishes for all of the given participants, highest priority first.
pub async fn list_for_participants<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_ids: Vec<i64>,
) -> Result<Vec<wishes::Model>, sea_orm::DbErr> {
    if participant_ids.is_empty() {
        return Ok(Vec::new());
    }
    wishes::Entity::find()
        .filter(wishes::Column::ParticipantId.is_in(participant_ids))
        .order_by_desc(wishes::Column::Priority)
        .all(conn)
        .await
}

pub async fn create_wish<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: WishCreate,
) -> Result<wishes::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let wish_active = wishes::ActiveModel {
        id: NotSet,
        participant_id: Set(dto.participant_id),
        title: Set(dto.title),
        description: Set(dto.description),
        url: Set(dto.url),
        priority: Set(dto.priority),
        created_at: Set(now),
    };

    wish_active.insert(conn).await
}

pub async fn delete_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    wish_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = wishes::Entity::delete_by_id(wish_id).exec(conn).await?;
    Ok(result.rows_affected)
}
