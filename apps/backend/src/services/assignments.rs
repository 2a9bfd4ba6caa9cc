//! Reading a giver's assignment after the draw.

use sea_orm::ConnectionTrait;

use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::repos::wishes::Wish;
use crate::repos::{assignments, groups, participants, wishes};

/// What the giver gets to see: who they drew and what that person wishes for.
#[derive(Debug, Clone)]
pub struct AssignmentView {
    pub group_name: String,
    pub receiver_anonymous_name: String,
    pub receiver_wishes: Vec<Wish>,
}

/// Load the assignment for `participant_id`, readable only by the user
/// behind that participant.
pub async fn assignment_for_giver<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    participant_id: i64,
) -> Result<AssignmentView, DomainError> {
    let giver = participants::require_participant(conn, participant_id).await?;
    if giver.user_id != user_id {
        return Err(DomainError::forbidden(
            "assignments are only visible to their giver",
        ));
    }

    let assignment = assignments::find_by_giver(conn, participant_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Assignment,
                "No assignment found; the draw may not have happened yet",
            )
        })?;

    let group = groups::require_group(conn, assignment.group_id).await?;
    if !group.drawn {
        // An assignment without the drawn flag should not exist; treat it
        // as the group not being drawn rather than leaking the row.
        return Err(DomainError::validation(
            ValidationKind::GroupNotDrawn,
            format!("group {} has not been drawn yet", group.id),
        ));
    }

    let receiver = participants::require_participant(conn, assignment.receiver_id).await?;
    let receiver_wishes = wishes::list_for_participants(conn, vec![receiver.id]).await?;

    Ok(AssignmentView {
        group_name: group.name,
        receiver_anonymous_name: receiver.anonymous_name,
        receiver_wishes,
    })
}
