//! Participant repository functions for the domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::participants_sea;
use crate::entities::participants;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Participant domain model.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: i64,
    pub group_id: i64,
    pub user_id: i64,
    pub anonymous_name: String,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_id: i64,
) -> Result<Option<Participant>, DomainError> {
    let participant = participants_sea::find_by_id(conn, participant_id).await?;
    Ok(participant.map(Participant::from))
}

/// Find participant by ID or return a typed not-found error.
pub async fn require_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_id: i64,
) -> Result<Participant, DomainError> {
    find_by_id(conn, participant_id).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Participant,
            format!("Participant {participant_id} not found"),
        )
    })
}

pub async fn find_by_group_and_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
    user_id: i64,
) -> Result<Option<Participant>, DomainError> {
    let participant = participants_sea::find_by_group_and_user(conn, group_id, user_id).await?;
    Ok(participant.map(Participant::from))
}

pub async fn list_for_group<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
) -> Result<Vec<Participant>, DomainError> {
    let participants = participants_sea::list_for_group(conn, group_id).await?;
    Ok(participants.into_iter().map(Participant::from).collect())
}

pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<Participant>, DomainError> {
    let participants = participants_sea::list_for_user(conn, user_id).await?;
    Ok(participants.into_iter().map(Participant::from).collect())
}

pub async fn create_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
    user_id: i64,
    anonymous_name: &str,
) -> Result<Participant, DomainError> {
    let participant =
        participants_sea::create_participant(conn, group_id, user_id, anonymous_name).await?;
    Ok(Participant::from(participant))
}

impl From<participants::Model> for Participant {
    fn from(model: participants::Model) -> Self {
        Self {
            id: model.id,
            group_id: model.group_id,
            user_id: model.user_id,
            anonymous_name: model.anonymous_name,
        }
    }
}
