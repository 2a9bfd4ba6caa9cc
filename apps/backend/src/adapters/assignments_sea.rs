//! SeaORM adapter for assignment persistence - generic over ConnectionTrait.
//!
//! Assignments are insert-only: the draw orchestrator creates the full set
//! for a group inside one transaction and nothing ever updates them.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait, QueryFilter, Set};

use crate::entities::assignments;

/// Insert the complete assignment set for a group.
pub async fn insert_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
    pairs: &[(i64, i64)],
) -> Result<(), sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let rows = pairs.iter().map(|&(giver_id, receiver_id)| assignments::ActiveModel {
        id: NotSet,
        group_id: Set(group_id),
        giver_id: Set(giver_id),
        receiver_id: Set(receiver_id),
        created_at: Set(now),
    });

    assignments::Entity::insert_many(rows).exec(conn).await?;
    Ok(())
}

pub async fn find_by_giver<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    giver_id: i64,
) -> Result<Option<assignments::Model>, sea_orm::DbErr> {
    assignments::Entity::find()
        .filter(assignments::Column::GiverId.eq(giver_id))
        .one(conn)
        .await
}

pub async fn list_for_group<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
) -> Result<Vec<assignments::Model>, sea_orm::DbErr> {
    assignments::Entity::find()
        .filter(assignments::Column::GroupId.eq(group_id))
        .all(conn)
        .await
}

pub async fn count_for_group<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    assignments::Entity::find()
        .filter(assignments::Column::GroupId.eq(group_id))
        .count(conn)
        .await
}
