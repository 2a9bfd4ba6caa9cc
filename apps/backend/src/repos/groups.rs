//! Group repository functions for the domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::groups_sea;
pub use crate::adapters::groups_sea::GroupCreate;
use crate::entities::groups;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Group domain model.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub code: String,
    pub drawn: bool,
    pub draw_date: Option<time::OffsetDateTime>,
    pub created_by: i64,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
) -> Result<Option<Group>, DomainError> {
    let group = groups_sea::find_by_id(conn, group_id).await?;
    Ok(group.map(Group::from))
}

pub async fn find_by_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
) -> Result<Option<Group>, DomainError> {
    let group = groups_sea::find_by_code(conn, code).await?;
    Ok(group.map(Group::from))
}

/// Find group by ID or return a typed not-found error.
pub async fn require_group<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
) -> Result<Group, DomainError> {
    find_by_id(conn, group_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Group, format!("Group {group_id} not found"))
    })
}

pub async fn create_group<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GroupCreate,
) -> Result<Group, DomainError> {
    let group = groups_sea::create_group(conn, dto).await?;
    Ok(Group::from(group))
}

/// Compare-and-swap the `drawn` flag; returns false if the flip was lost
/// to a concurrent draw (or the group is already drawn).
pub async fn mark_drawn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
) -> Result<bool, DomainError> {
    Ok(groups_sea::mark_drawn(conn, group_id).await?)
}

impl From<groups::Model> for Group {
    fn from(model: groups::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            code: model.code,
            drawn: model.drawn,
            draw_date: model.draw_date,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
