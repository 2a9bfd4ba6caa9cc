//! SeaORM adapter for group persistence - generic over ConnectionTrait.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::groups;

// Adapter functions return DbErr; the repos layer maps to DomainError.

/// Fields required to create a group. The `drawn` flag always starts false.
#[derive(Debug, Clone)]
pub struct GroupCreate {
    pub name: String,
    pub description: Option<String>,
    pub code: String,
    pub draw_date: Option<time::OffsetDateTime>,
    pub created_by: i64,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
) -> Result<Option<groups::Model>, sea_orm::DbErr> {
    groups::Entity::find_by_id(group_id).one(conn).await
}

pub async fn find_by_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
) -> Result<Option<groups::Model>, sea_orm::DbErr> {
    groups::Entity::find()
        .filter(groups::Column::Code.eq(code))
        .one(conn)
        .await
}

pub async fn create_group<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GroupCreate,
) -> Result<groups::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let group_active = groups::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        description: Set(dto.description),
        code: Set(dto.code),
        drawn: Set(false),
        draw_date: Set(dto.draw_date),
        created_by: Set(dto.created_by),
        created_at: Set(now),
        updated_at: Set(now),
    };

    group_active.insert(conn).await
}

/// Atomically flip `drawn` from false to true.
///
/// This is the compare-and-swap that makes the draw at-most-once: of any
/// number of concurrent transactions only one can see `rows_affected == 1`.
/// Returns true if this caller won the flip.
pub async fn mark_drawn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = groups::Entity::update_many()
        .col_expr(groups::Column::Drawn, sea_orm::sea_query::Expr::value(true))
        .col_expr(
            groups::Column::UpdatedAt,
            sea_orm::sea_query::Expr::value(now),
        )
        .filter(groups::Column::Id.eq(group_id))
        .filter(groups::Column::Drawn.eq(false))
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}
