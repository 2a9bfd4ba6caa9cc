//! Assignment repository functions for the domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::assignments_sea;
use crate::entities::assignments;
use crate::errors::domain::DomainError;

/// Assignment domain model: a giver → receiver edge within one group.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub id: i64,
    pub group_id: i64,
    pub giver_id: i64,
    pub receiver_id: i64,
}

/// Insert the complete assignment set for a group.
pub async fn insert_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
    pairs: &[(i64, i64)],
) -> Result<(), DomainError> {
    Ok(assignments_sea::insert_all(conn, group_id, pairs).await?)
}

pub async fn find_by_giver<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    giver_id: i64,
) -> Result<Option<Assignment>, DomainError> {
    let assignment = assignments_sea::find_by_giver(conn, giver_id).await?;
    Ok(assignment.map(Assignment::from))
}

pub async fn list_for_group<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
) -> Result<Vec<Assignment>, DomainError> {
    let assignments = assignments_sea::list_for_group(conn, group_id).await?;
    Ok(assignments.into_iter().map(Assignment::from).collect())
}

pub async fn count_for_group<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
) -> Result<u64, DomainError> {
    Ok(assignments_sea::count_for_group(conn, group_id).await?)
}

impl From<assignments::Model> for Assignment {
    fn from(model: assignments::Model) -> Self {
        Self {
            id: model.id,
            group_id: model.group_id,
            giver_id: model.giver_id,
            receiver_id: model.receiver_id,
        }
    }
}
