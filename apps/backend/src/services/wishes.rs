//! Wish list management, scoped to the requesting user's own participant.

use sea_orm::ConnectionTrait;

use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::wishes::{Wish, WishCreate};
use crate::repos::{participants, wishes};

#[derive(Debug, Clone)]
pub struct AddWishInput {
    pub participant_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub priority: i32,
}

/// Add a wish to one of the user's own participants.
pub async fn add_wish<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    input: AddWishInput,
) -> Result<Wish, DomainError> {
    if input.title.trim().is_empty() {
        return Err(DomainError::validation(
            ValidationKind::MissingField,
            "wish title is required",
        ));
    }

    let participant = participants::require_participant(conn, input.participant_id).await?;
    if participant.user_id != user_id {
        return Err(DomainError::forbidden(
            "wishes can only be added to your own participant",
        ));
    }

    wishes::create_wish(
        conn,
        WishCreate {
            participant_id: participant.id,
            title: input.title,
            description: input.description,
            url: input.url,
            priority: input.priority,
        },
    )
    .await
}

/// Remove one of the user's own wishes.
pub async fn remove_wish<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    wish_id: i64,
) -> Result<(), DomainError> {
    let wish = wishes::require_wish(conn, wish_id).await?;
    let participant = participants::require_participant(conn, wish.participant_id).await?;
    if participant.user_id != user_id {
        return Err(DomainError::forbidden(
            "wishes can only be removed from your own participant",
        ));
    }

    wishes::delete_wish(conn, wish_id).await
}
