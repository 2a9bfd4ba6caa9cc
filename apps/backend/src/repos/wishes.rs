//! Wish repository functions for the domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::wishes_sea;
pub use crate::adapters::wishes_sea::WishCreate;
use crate::entities::wishes;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Wish domain model.
#[derive(Debug, Clone, PartialEq)]
pub struct Wish {
    pub id: i64,
    pub participant_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub priority: i32,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    wish_id: i64,
) -> Result<Option<Wish>, DomainError> {
    let wish = wishes_sea::find_by_id(conn, wish_id).await?;
    Ok(wish.map(Wish::from))
}

/// Find wish by ID or return a typed not-found error.
pub async fn require_wish<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    wish_id: i64,
) -> Result<Wish, DomainError> {
    find_by_id(conn, wish_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Wish, format!("Wish {wish_id} not found"))
    })
}

/// Wishes for all of the given participants, highest priority first.
pub async fn list_for_participants<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_ids: Vec<i64>,
) -> Result<Vec<Wish>, DomainError> {
    let wishes = wishes_sea::list_for_participants(conn, participant_ids).await?;
    Ok(wishes.into_iter().map(Wish::from).collect())
}

pub async fn create_wish<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: WishCreate,
) -> Result<Wish, DomainError> {
    let wish = wishes_sea::create_wish(conn, dto).await?;
    Ok(Wish::from(wish))
}

pub async fn delete_wish<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    wish_id: i64,
) -> Result<(), DomainError> {
    let rows = wishes_sea::delete_by_id(conn, wish_id).await?;
    if rows == 0 {
        return Err(DomainError::not_found(
            NotFoundKind::Wish,
            format!("Wish {wish_id} not found"),
        ));
    }
    Ok(())
}

impl From<wishes::Model> for Wish {
    fn from(model: wishes::Model) -> Self {
        Self {
            id: model.id,
            participant_id: model.participant_id,
            title: model.title,
            description: model.description,
            url: model.url,
            priority: model.priority,
        }
    }
}
